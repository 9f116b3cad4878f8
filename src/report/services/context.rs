//! Per-session resolution state and task flattening.

use tracing::debug;

use super::{HierarchyResolver, ReportError, ReportResult};
use crate::report::{
    domain::{
        CustomFieldProjection, FlatTaskRow, GroupMembershipIndex, RawTask, ReportConfig, TaskId,
        TypeOptionsSource,
    },
    ports::TaskSource,
};

/// Caches and indexes shared by every task flattened in one session.
///
/// Build one per session and pass it explicitly; nothing is global.
#[derive(Debug)]
pub struct ResolutionContext {
    hierarchy: HierarchyResolver,
    groups: GroupMembershipIndex,
    type_options_source: TypeOptionsSource,
}

/// Task that could not be flattened in a lenient batch.
#[derive(Debug)]
pub struct FlattenFailure {
    /// Task that failed.
    pub task_id: TaskId,
    /// Cause.
    pub error: ReportError,
}

/// Outcome of a lenient batch: rows for the tasks that succeeded plus one
/// failure per task that did not.
#[derive(Debug, Default)]
pub struct LenientBatch {
    /// Rows in task order.
    pub rows: Vec<FlatTaskRow>,
    /// Failures in task order.
    pub failures: Vec<FlattenFailure>,
}

impl ResolutionContext {
    /// Creates a context around a prebuilt group index.
    #[must_use]
    pub fn new(groups: GroupMembershipIndex, config: &ReportConfig) -> Self {
        Self {
            hierarchy: HierarchyResolver::new(config.hierarchy_cache_capacity),
            groups,
            type_options_source: config.type_options_source,
        }
    }

    /// Returns the group membership index.
    #[must_use]
    pub const fn groups(&self) -> &GroupMembershipIndex {
        &self.groups
    }

    /// Returns the hierarchy resolver.
    #[must_use]
    pub const fn hierarchy(&self) -> &HierarchyResolver {
        &self.hierarchy
    }

    /// Flattens one task into its report rows.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] when a container name cannot be
    /// resolved and [`ReportError::Timestamp`] when a timestamp is malformed.
    pub async fn flatten_task<S>(
        &mut self,
        source: &S,
        task: &RawTask,
    ) -> ReportResult<Vec<FlatTaskRow>>
    where
        S: TaskSource + ?Sized,
    {
        let names = self.hierarchy.resolve(source, task).await?;
        let fields =
            CustomFieldProjection::from_fields(&task.custom_fields, self.type_options_source)?;
        let rows = FlatTaskRow::fan_out(task, names, fields, &self.groups)?;
        debug!(task_id = %task.id, rows = rows.len(), "flattened task");
        Ok(rows)
    }

    /// Flattens tasks in order; the first failure aborts the whole batch.
    ///
    /// # Errors
    ///
    /// See [`Self::flatten_task`].
    pub async fn flatten_tasks<S>(
        &mut self,
        source: &S,
        tasks: &[RawTask],
    ) -> ReportResult<Vec<FlatTaskRow>>
    where
        S: TaskSource + ?Sized,
    {
        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            rows.extend(self.flatten_task(source, task).await?);
        }
        Ok(rows)
    }

    /// Flattens tasks in order, recording failures per task instead of
    /// aborting.
    pub async fn flatten_tasks_lenient<S>(
        &mut self,
        source: &S,
        tasks: &[RawTask],
    ) -> LenientBatch
    where
        S: TaskSource + ?Sized,
    {
        let mut batch = LenientBatch::default();
        for task in tasks {
            match self.flatten_task(source, task).await {
                Ok(rows) => batch.rows.extend(rows),
                Err(error) => batch.failures.push(FlattenFailure {
                    task_id: task.id.clone(),
                    error,
                }),
            }
        }
        batch
    }
}
