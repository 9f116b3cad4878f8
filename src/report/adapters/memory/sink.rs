//! In-memory row sink for tests.

use serde::Serialize;
use serde_json::Value;

use crate::report::ports::{RowSink, RowSinkResult};

/// Row sink that keeps serialized rows in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRowSink {
    rows: Vec<Value>,
}

impl InMemoryRowSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rows written so far.
    #[must_use]
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Returns the column names of the first row, in output order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .and_then(Value::as_object)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl RowSink for InMemoryRowSink {
    fn write_rows<R: Serialize>(&mut self, rows: &[R]) -> RowSinkResult<()> {
        for row in rows {
            self.rows.push(serde_json::to_value(row)?);
        }
        Ok(())
    }
}
