//! Service-level errors for report generation.

use crate::report::{
    domain::TimestampError,
    ports::{RowSinkError, TaskSourceError},
};
use thiserror::Error;

/// Errors returned by report services.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A date or timestamp could not be parsed or formatted.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// The task source failed, including unknown hierarchy identifiers.
    #[error(transparent)]
    Source(#[from] TaskSourceError),

    /// Rows could not be written.
    #[error(transparent)]
    Sink(#[from] RowSinkError),

    /// No team has the configured workspace name.
    #[error("no team named '{0}'")]
    TeamNotFound(String),
}

/// Result type for report service operations.
pub type ReportResult<T> = Result<T, ReportError>;
