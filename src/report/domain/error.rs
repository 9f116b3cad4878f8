//! Error types for timestamp parsing and formatting.

use thiserror::Error;

/// Errors returned by the timestamp codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimestampError {
    /// The calendar date does not match `YYYY-MM-DD`.
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// Rejected input.
        input: String,
    },

    /// Local midnight does not exist for the date in the configured zone.
    #[error("local midnight does not exist on {input}")]
    NonexistentLocalTime {
        /// Date whose midnight falls in a zone transition gap.
        input: String,
    },

    /// A textual timestamp is not an integer.
    #[error("invalid timestamp '{input}', expected an integer")]
    InvalidTimestamp {
        /// Rejected input.
        input: String,
    },

    /// The timestamp is outside the representable calendar range.
    #[error("timestamp {0} is out of range")]
    OutOfRange(i64),

    /// The format pattern contains an unsupported specifier.
    #[error("invalid format pattern '{pattern}'")]
    InvalidPattern {
        /// Rejected pattern.
        pattern: String,
    },
}
