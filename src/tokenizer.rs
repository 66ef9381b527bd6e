//! Raw-line tokenizer for the IRC wire grammar.
//!
//! ```text
//! line      := [ ":" prefix SP ] command (SP parameter)* CRLF?
//! prefix    := any-chars-except-SP
//! command   := word | 3DIGIT
//! parameter := trailing | middle
//! trailing  := ":" any-chars-incl-SP   ; only at a fresh parameter boundary
//! middle    := any-chars-except-SP
//! ```
//!
//! [`prefix`], [`command`] and [`parameters`] are pure, zero-copy slice
//! functions over the raw line. [`tokenize`] produces an owned
//! [`TokenizedLine`] behind a one-entry per-thread memo so repeated
//! recognizer trials over the same line during a dispatch pay for
//! tokenization once.

use std::cell::RefCell;
use std::sync::Arc;

use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::sequence::preceded;
use nom::IResult;
use smallvec::SmallVec;

/// Recognize a `:`-introduced prefix at the start of a line.
fn prefix_parser(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Strip a trailing line terminator, if any.
#[inline]
fn trim_line(raw: &str) -> &str {
    raw.trim_end_matches(['\r', '\n'])
}

/// The sender prefix of `raw`: the text between a leading `:` and the
/// first following space, or `""` when the line carries no prefix.
///
/// ```
/// assert_eq!(clirc_proto::tokenizer::prefix(":nick!u@h CMD a"), "nick!u@h");
/// assert_eq!(clirc_proto::tokenizer::prefix("CMD a"), "");
/// ```
pub fn prefix(raw: &str) -> &str {
    let raw = trim_line(raw);
    match prefix_parser(raw) {
        Ok((_, p)) => p,
        Err(_) => "",
    }
}

/// The remainder of `raw` after the optional prefix and its separator.
fn after_prefix(raw: &str) -> &str {
    if raw.starts_with(':') {
        match raw.find(' ') {
            Some(i) => &raw[i + 1..],
            None => "",
        }
    } else {
        raw
    }
}

/// The command token of `raw`: the first token after the optional prefix.
///
/// ```
/// assert_eq!(clirc_proto::tokenizer::command(":n!u@h 001 t :Welcome"), "001");
/// assert_eq!(clirc_proto::tokenizer::command("PING :x"), "PING");
/// ```
pub fn command(raw: &str) -> &str {
    let rest = after_prefix(trim_line(raw));
    match rest.find(' ') {
        Some(i) => &rest[..i],
        None => rest,
    }
}

/// The parameters of `raw`, in wire order.
///
/// Parameters are separated by spaces. A `:` at a fresh parameter
/// boundary makes the verbatim remainder of the line (spaces included)
/// the final parameter. A pending parameter is flushed at end of input
/// even without a trailing space; runs of spaces produce no empty
/// parameters.
///
/// ```
/// use clirc_proto::tokenizer::parameters;
/// assert!(parameters("CMD").is_empty());
/// assert_eq!(parameters("CMD a :b c d").as_slice(), ["a", "b c d"]);
/// ```
pub fn parameters(raw: &str) -> SmallVec<[&str; 15]> {
    let mut params = SmallVec::new();
    let rest = {
        let body = after_prefix(trim_line(raw));
        match body.find(' ') {
            Some(i) => &body[i + 1..],
            None => "",
        }
    };

    let bytes = rest.as_bytes();
    let mut start: Option<usize> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b' ' => {
                if let Some(s) = start.take() {
                    params.push(&rest[s..i]);
                }
            }
            b':' if start.is_none() => {
                // Fresh boundary: the remainder is the trailing parameter.
                params.push(&rest[i + 1..]);
                return params;
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        params.push(&rest[s..]);
    }
    params
}

/// The byte index of the `n`th occurrence (1-based) of `token` in
/// `text`, searching from `start`. Returns `None` when fewer than `n`
/// occurrences exist past `start`, or when `token` is empty.
pub fn nth_index_of(text: &str, token: &str, start: usize, n: usize) -> Option<usize> {
    if token.is_empty() || n == 0 || start > text.len() {
        return None;
    }
    let mut from = start;
    let mut remaining = n;
    loop {
        let found = text.get(from..)?.find(token)? + from;
        remaining -= 1;
        if remaining == 0 {
            return Some(found);
        }
        from = found + token.len();
    }
}

/// A fully tokenized raw line with owned components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    /// Sender prefix, possibly empty.
    pub prefix: String,
    /// Command token.
    pub command: String,
    /// Parameters in wire order.
    pub params: Vec<String>,
}

thread_local! {
    // One-entry memo keyed on the exact input line. Confined to the
    // dispatching thread, so no lock is needed; the key comparison
    // guarantees a stale entry is never served for a different input.
    static LAST_LINE: RefCell<Option<(String, Arc<TokenizedLine>)>> = const { RefCell::new(None) };
}

/// Tokenize `raw` into an owned [`TokenizedLine`].
///
/// Backed by a one-entry per-thread memo: repeated calls with the exact
/// same input string (the common case while a dispatch trials many
/// recognizers) return a shared result without re-scanning the line.
pub fn tokenize(raw: &str) -> Arc<TokenizedLine> {
    LAST_LINE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some((key, line)) = slot.as_ref() {
            if key == raw {
                return Arc::clone(line);
            }
        }
        let line = Arc::new(TokenizedLine {
            prefix: prefix(raw).to_owned(),
            command: command(raw).to_owned(),
            params: parameters(raw).iter().map(|p| (*p).to_owned()).collect(),
        });
        *slot = Some((raw.to_owned(), Arc::clone(&line)));
        line
    })
}
