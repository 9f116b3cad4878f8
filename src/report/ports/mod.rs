//! Port contracts for task report generation.
//!
//! Ports define infrastructure-agnostic interfaces used by report services.

pub mod sink;
pub mod task_source;

pub use sink::{RowSink, RowSinkError, RowSinkResult};
#[cfg(test)]
pub use task_source::MockTaskSource;
pub use task_source::{TaskSource, TaskSourceError, TaskSourceResult};
