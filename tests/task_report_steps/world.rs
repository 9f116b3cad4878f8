//! Shared world state for task report BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflat::report::{
    adapters::memory::InMemoryTaskSource,
    domain::{
        ContainerRef, EpochValue, FlatTaskRow, FolderId, Group, ListId, MemberRef, RawTask,
        ReportConfig, SpaceId, TaskId, TaskStatus,
    },
    services::{ReportError, TaskReportService},
};

/// Service type used by the BDD world.
pub type TestReportService = TaskReportService<InMemoryTaskSource, DefaultClock>;

/// 2024-03-09T16:00:00Z in milliseconds.
pub const SCENARIO_CREATED_MS: i64 = 1_710_000_000_000;

/// Scenario world for task report behaviour tests.
pub struct TaskReportWorld {
    pub source: InMemoryTaskSource,
    pub config: ReportConfig,
    pub team_id: Option<String>,
    pub groups: Vec<Group>,
    pub tasks: Vec<RawTask>,
    pub last_report: Option<Result<Vec<FlatTaskRow>, ReportError>>,
}

impl TaskReportWorld {
    /// Creates a world with an empty source and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: InMemoryTaskSource::new(),
            config: ReportConfig::default(),
            team_id: None,
            groups: Vec::new(),
            tasks: Vec::new(),
            last_report: None,
        }
    }

    /// Looks up a pending task by identifier.
    pub fn task_mut(&mut self, id: &str) -> Result<&mut RawTask, eyre::Report> {
        self.tasks
            .iter_mut()
            .find(|task| task.id.as_str() == id)
            .ok_or_else(|| eyre::eyre!("no task \"{id}\" in scenario world"))
    }

    /// Adds a member to the named group, creating the group on first use.
    pub fn add_group_member(&mut self, group: &str, member: MemberRef) {
        if let Some(existing) = self.groups.iter_mut().find(|entry| entry.name == group) {
            existing.members.push(member);
            return;
        }
        let id = format!("g{}", self.groups.len() + 1);
        self.groups.push(Group::new(id, group, vec![member]));
    }

    /// Builds a report service over the pending groups and tasks.
    pub fn service(&self, list: &str) -> Result<TestReportService, eyre::Report> {
        let team_id = self
            .team_id
            .clone()
            .ok_or_else(|| eyre::eyre!("missing workspace in scenario world"))?;
        let mut source = self
            .source
            .clone()
            .with_tasks(list, self.tasks.clone());
        for group in &self.groups {
            source = source.with_group(team_id.clone(), group.clone());
        }
        Ok(TaskReportService::new(
            Arc::new(source),
            Arc::new(DefaultClock),
            self.config.clone(),
        ))
    }

    /// Returns the successful report rows.
    pub fn rows(&self) -> Result<&[FlatTaskRow], eyre::Report> {
        match self.last_report.as_ref() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(err)) => Err(eyre::eyre!("report failed: {err}")),
            None => Err(eyre::eyre!("no report generated in scenario world")),
        }
    }

    /// Returns the row at a one-based position.
    pub fn row(&self, position: usize) -> Result<&FlatTaskRow, eyre::Report> {
        let rows = self.rows()?;
        position
            .checked_sub(1)
            .and_then(|index| rows.get(index))
            .ok_or_else(|| eyre::eyre!("no row {position} among {} rows", rows.len()))
    }
}

impl Default for TaskReportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an open task created in March 2024.
#[must_use]
pub fn scenario_task(id: &str, list: &str, folder: &str, space: &str) -> RawTask {
    RawTask {
        id: TaskId::new(id),
        name: format!("Task {id}"),
        description: None,
        status: TaskStatus {
            status: "to do".to_owned(),
            kind: "open".to_owned(),
        },
        date_created: Some(EpochValue::from(SCENARIO_CREATED_MS)),
        date_updated: None,
        date_closed: None,
        start_date: None,
        due_date: None,
        creator: MemberRef::new(1, "creator"),
        parent: None,
        archived: false,
        list: ContainerRef::new(ListId::new(list)),
        folder: ContainerRef::new(FolderId::new(folder)),
        space: ContainerRef::new(SpaceId::new(space)),
        custom_fields: Vec::new(),
        assignees: Vec::new(),
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskReportWorld {
    TaskReportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
