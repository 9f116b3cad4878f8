//! Application services for task report generation.

mod context;
mod error;
mod hierarchy;
mod report;

pub use context::{FlattenFailure, LenientBatch, ResolutionContext};
pub use error::{ReportError, ReportResult};
pub use hierarchy::HierarchyResolver;
pub use report::TaskReportService;
