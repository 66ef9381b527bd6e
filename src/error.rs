//! Error types for the codec and dispatcher.
//!
//! There are deliberately only two dispatch-level failures: a line whose
//! length is out of bounds, and a recognizer whose `parse` step rejected
//! the line. A panic inside a match closure is neither: it signals a
//! defective recognizer and is allowed to propagate.

use thiserror::Error;

/// Convenience type alias for Results using [`DispatchError`].
pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Failures produced by [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// Line length was outside the valid `1..=512` range.
    #[error("line length {len} outside 1..=512")]
    Length {
        /// The offending length in bytes (line terminator excluded).
        len: usize,
        /// The raw line as received.
        raw: String,
    },

    /// A recognizer's `parse` step rejected the line.
    #[error("failed to parse line: {raw}")]
    Parse {
        /// The raw line that failed to parse.
        raw: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors a message type may raise from its `parse` step.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Not enough parameters for the message type.
    #[error("not enough arguments: expected {expected}, got {got}")]
    NotEnoughArguments {
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters.
        got: usize,
    },

    /// A parameter was present but invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The command token was not a valid numeric code.
    #[error("invalid numeric command: {0}")]
    InvalidNumeric(String),
}
