//! Row sink port: where report rows are written.

use serde::Serialize;
use thiserror::Error;

/// Result type for row sink operations.
pub type RowSinkResult<T> = Result<T, RowSinkError>;

/// Tabular output for report rows.
///
/// Column names come from the row type's serialized field names.
pub trait RowSink {
    /// Appends rows in order.
    ///
    /// # Errors
    ///
    /// Returns [`RowSinkError`] when a row cannot be serialized or written.
    fn write_rows<R: Serialize>(&mut self, rows: &[R]) -> RowSinkResult<()>;
}

/// Errors returned by row sink implementations.
#[derive(Debug, Error)]
pub enum RowSinkError {
    /// A row could not be serialized.
    #[error("row serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The underlying writer failed.
    #[error("row output failed: {0}")]
    Io(#[from] std::io::Error),
}
