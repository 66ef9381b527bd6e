//! Classification of three-digit numeric reply codes.
//!
//! Numeric replies fall into three bands:
//! - Direct: 001-099, sent directly to a client during registration
//! - Error: 400-599 plus the modern 900-998 block
//! - Command reply: everything else within 000-999
//!
//! The predicates here are pure and total over `u16`; codes above 999
//! are not numeric commands and classify as `None`.

/// Classification of a numeric reply code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericClass {
    /// Direct message to a client (001-099).
    Direct,
    /// Reply to a command (the remainder of 000-999).
    CommandReply,
    /// Error reply (400-599, 900-998).
    Error,
}

/// Whether `code` is inside the numeric command space at all.
#[inline]
pub fn is_numeric(code: u16) -> bool {
    code <= 999
}

/// Whether `code` is a direct message to a client (001-099).
#[inline]
pub fn is_direct(code: u16) -> bool {
    (1..=99).contains(&code)
}

/// Whether `code` is an error reply (400-599 or 900-998).
#[inline]
pub fn is_error(code: u16) -> bool {
    (400..=599).contains(&code) || (900..=998).contains(&code)
}

/// Whether `code` is a reply to a command.
///
/// This is everything inside 000-999 that is neither direct nor error.
#[inline]
pub fn is_command_reply(code: u16) -> bool {
    is_numeric(code) && !is_error(code) && !is_direct(code)
}

/// Classify `code`, or `None` if it is outside the numeric space.
pub fn classify(code: u16) -> Option<NumericClass> {
    if !is_numeric(code) {
        None
    } else if is_error(code) {
        Some(NumericClass::Error)
    } else if is_direct(code) {
        Some(NumericClass::Direct)
    } else {
        Some(NumericClass::CommandReply)
    }
}
