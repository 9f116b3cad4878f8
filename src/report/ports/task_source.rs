//! Task source port: the hosted project-management backend.

use crate::report::domain::{
    Folder, FolderId, Group, ListId, RawTask, Space, SpaceId, TaskQuery, Team, TeamId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task source operations.
pub type TaskSourceResult<T> = Result<T, TaskSourceError>;

/// Read-only access to teams, hierarchy containers, groups and tasks.
///
/// Pagination, rate limiting and authentication are the implementation's
/// concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Lists the teams visible to the caller.
    async fn list_teams(&self) -> TaskSourceResult<Vec<Team>>;

    /// Lists the spaces of a team.
    async fn list_spaces(&self, team_id: &TeamId, archived: bool)
    -> TaskSourceResult<Vec<Space>>;

    /// Lists the folders of a space, each with its lists.
    async fn list_folders(&self, space_id: &SpaceId) -> TaskSourceResult<Vec<Folder>>;

    /// Lists the user groups of a team with their members.
    async fn list_groups(&self, team_id: &TeamId) -> TaskSourceResult<Vec<Group>>;

    /// Lists the tasks of a list matching `query`, in a stable order. A
    /// known list without tasks yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::UnknownList`] for unknown identifiers.
    async fn list_tasks(&self, list_id: &ListId, query: &TaskQuery)
    -> TaskSourceResult<Vec<RawTask>>;

    /// Resolves a list name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::UnknownList`] for unknown identifiers.
    async fn resolve_list_name(&self, list_id: &ListId) -> TaskSourceResult<String>;

    /// Resolves a folder name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::UnknownFolder`] for unknown identifiers.
    async fn resolve_folder_name(&self, folder_id: &FolderId) -> TaskSourceResult<String>;

    /// Resolves a space name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::UnknownSpace`] for unknown identifiers.
    async fn resolve_space_name(&self, space_id: &SpaceId) -> TaskSourceResult<String>;
}

/// Errors returned by task source implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskSourceError {
    /// No list has the identifier.
    #[error("unknown list: {0}")]
    UnknownList(ListId),

    /// No folder has the identifier.
    #[error("unknown folder: {0}")]
    UnknownFolder(FolderId),

    /// No space has the identifier.
    #[error("unknown space: {0}")]
    UnknownSpace(SpaceId),

    /// The response body could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskSourceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` for unknown-identifier lookups.
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::UnknownList(_) | Self::UnknownFolder(_) | Self::UnknownSpace(_)
        )
    }
}
