//! CTCP framing detection.
//!
//! The dispatcher does not parse CTCP itself; it consumes a pair of
//! predicates deciding whether a raw line is CTCP-framed and whether
//! the framing is a request or a reply. [`DelimCtcpProbe`] is the stock
//! implementation based on the `\x01` delimiter convention.

use crate::tokenizer;

/// The CTCP delimiter character (`\x01`).
pub const CTCP_DELIM: char = '\x01';

/// Predicates the dispatcher consumes to route CTCP-framed lines.
pub trait CtcpProbe: Send + Sync {
    /// Whether `raw` is a CTCP-framed line.
    fn is_ctcp(&self, raw: &str) -> bool;

    /// Whether a CTCP-framed `raw` is a request (as opposed to a reply).
    ///
    /// Only called for lines `is_ctcp` accepted.
    fn is_request(&self, raw: &str) -> bool;
}

/// Delimiter-based CTCP detection.
///
/// A PRIVMSG or NOTICE whose final parameter starts with [`CTCP_DELIM`]
/// is CTCP-framed; PRIVMSG framing carries a request, NOTICE a reply.
#[derive(Clone, Copy, Debug, Default)]
pub struct DelimCtcpProbe;

impl CtcpProbe for DelimCtcpProbe {
    fn is_ctcp(&self, raw: &str) -> bool {
        let command = tokenizer::command(raw);
        if !command.eq_ignore_ascii_case("PRIVMSG") && !command.eq_ignore_ascii_case("NOTICE") {
            return false;
        }
        tokenizer::parameters(raw)
            .last()
            .is_some_and(|body| body.starts_with(CTCP_DELIM))
    }

    fn is_request(&self, raw: &str) -> bool {
        tokenizer::command(raw).eq_ignore_ascii_case("PRIVMSG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_delimited_privmsg() {
        let probe = DelimCtcpProbe;
        assert!(probe.is_ctcp(":n!u@h PRIVMSG #chan :\u{1}ACTION waves\u{1}"));
        assert!(probe.is_ctcp(":n!u@h NOTICE target :\u{1}VERSION client 1.0\u{1}"));
        assert!(!probe.is_ctcp(":n!u@h PRIVMSG #chan :plain text"));
        assert!(!probe.is_ctcp("PING :\u{1}x\u{1}"));
    }

    #[test]
    fn request_vs_reply() {
        let probe = DelimCtcpProbe;
        assert!(probe.is_request(":n PRIVMSG t :\u{1}PING 1\u{1}"));
        assert!(!probe.is_request(":n NOTICE t :\u{1}PING 1\u{1}"));
    }
}
