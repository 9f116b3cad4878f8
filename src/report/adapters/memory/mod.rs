//! In-memory adapters.

mod sink;
mod task_source;

pub use sink::InMemoryRowSink;
pub use task_source::{InMemoryTaskSource, LookupCounts};
