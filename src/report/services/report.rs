//! Service layer tying the task source to the report pipeline.

use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

use super::{ReportError, ReportResult, ResolutionContext};
use crate::report::{
    domain::{
        FlatTaskRow, GroupMemberRow, GroupMembershipIndex, ListId, ListSummaryRow, RawTask,
        ReportConfig, SpaceId, SpaceSummaryRow, TaskFilters, TaskQuery, TeamId, select_team,
    },
    ports::{RowSink, TaskSource},
};

/// Task report orchestration service.
#[derive(Clone)]
pub struct TaskReportService<S, C>
where
    S: TaskSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    clock: Arc<C>,
    config: ReportConfig,
}

impl<S, C> TaskReportService<S, C>
where
    S: TaskSource,
    C: Clock + Send + Sync,
{
    /// Creates a new report service.
    #[must_use]
    pub const fn new(source: Arc<S>, clock: Arc<C>, config: ReportConfig) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Finds the team named by the configured workspace name.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TeamNotFound`] when no team matches, or
    /// [`ReportError::Source`] when teams cannot be listed.
    pub async fn team_id(&self) -> ReportResult<TeamId> {
        let teams = self.source.list_teams().await?;
        select_team(&teams, &self.config.workspace_name)
            .map(|team| team.id.clone())
            .ok_or_else(|| {
                warn!(workspace = %self.config.workspace_name, "no matching team");
                ReportError::TeamNotFound(self.config.workspace_name.clone())
            })
    }

    /// Builds the group index for the configured workspace and returns a
    /// fresh resolution context.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the team cannot be found or groups
    /// cannot be listed.
    pub async fn open_session(&self) -> ReportResult<ResolutionContext> {
        let team_id = self.team_id().await?;
        let groups = self.source.list_groups(&team_id).await?;
        let index = GroupMembershipIndex::build(
            &groups,
            &self.config.excluded_group_name,
            self.config.membership_tie_break,
        );
        info!(
            %team_id,
            groups = groups.len(),
            members = index.member_count(),
            "built group membership index"
        );
        Ok(ResolutionContext::new(index, &self.config))
    }

    /// Lists group memberships of a team, one row per membership.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when groups cannot be listed or a creation
    /// date is malformed.
    pub async fn group_members(&self, team_id: &TeamId) -> ReportResult<Vec<GroupMemberRow>> {
        let groups = self.source.list_groups(team_id).await?;
        Ok(GroupMemberRow::from_groups(
            &groups,
            &self.config.excluded_group_name,
        )?)
    }

    /// Lists the spaces of a team.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] when spaces cannot be listed.
    pub async fn spaces(
        &self,
        team_id: &TeamId,
        archived: bool,
    ) -> ReportResult<Vec<SpaceSummaryRow>> {
        let spaces = self.source.list_spaces(team_id, archived).await?;
        Ok(spaces.into_iter().map(SpaceSummaryRow::from).collect())
    }

    /// Lists the lists of a space, one row per list with its folder.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Source`] when folders cannot be listed.
    pub async fn lists(&self, space_id: &SpaceId) -> ReportResult<Vec<ListSummaryRow>> {
        let folders = self.source.list_folders(space_id).await?;
        Ok(ListSummaryRow::from_folders(&folders))
    }

    /// Builds the task query for `filters` under the configured flags.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Timestamp`] when a filter date is malformed.
    pub fn task_query(&self, filters: &TaskFilters) -> ReportResult<TaskQuery> {
        let bounds = filters.to_bounds(&*self.clock)?;
        Ok(TaskQuery {
            archived: self.config.include_archived,
            include_subtasks: self.config.include_subtasks,
            include_closed: self.config.include_closed,
            bounds,
        })
    }

    /// Fetches unflattened task records.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when a filter is malformed or the source
    /// fails.
    pub async fn fetch_raw_tasks(
        &self,
        list_id: &ListId,
        filters: &TaskFilters,
    ) -> ReportResult<Vec<RawTask>> {
        let query = self.task_query(filters)?;
        Ok(self.source.list_tasks(list_id, &query).await?)
    }

    /// Fetches and flattens the tasks of a list.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when fetching fails or any task cannot be
    /// flattened; no partial result is returned.
    pub async fn task_rows(
        &self,
        context: &mut ResolutionContext,
        list_id: &ListId,
        filters: &TaskFilters,
    ) -> ReportResult<Vec<FlatTaskRow>> {
        let tasks = self.fetch_raw_tasks(list_id, filters).await?;
        let rows = context.flatten_tasks(&*self.source, &tasks).await?;
        info!(%list_id, tasks = tasks.len(), rows = rows.len(), "flattened task batch");
        Ok(rows)
    }

    /// Fetches, flattens and writes the tasks of a list to `sink`,
    /// returning the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when any step fails; nothing is written if
    /// flattening fails.
    pub async fn export_task_rows<K: RowSink>(
        &self,
        context: &mut ResolutionContext,
        list_id: &ListId,
        filters: &TaskFilters,
        sink: &mut K,
    ) -> ReportResult<usize> {
        let rows = self.task_rows(context, list_id, filters).await?;
        sink.write_rows(&rows)?;
        Ok(rows.len())
    }
}
