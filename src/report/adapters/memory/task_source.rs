//! In-memory task source for tests and offline fixtures.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::report::{
    domain::{
        Folder, FolderId, Group, ListId, RawTask, Space, SpaceId, TaskQuery, Team, TeamId,
    },
    ports::{TaskSource, TaskSourceError, TaskSourceResult},
};

/// Number of name lookups served per hierarchy level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupCounts {
    /// List name lookups.
    pub list: usize,
    /// Folder name lookups.
    pub folder: usize,
    /// Space name lookups.
    pub space: usize,
}

/// Thread-safe in-memory task source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    teams: Vec<Team>,
    spaces: HashMap<TeamId, Vec<Space>>,
    folders: HashMap<SpaceId, Vec<Folder>>,
    groups: HashMap<TeamId, Vec<Group>>,
    tasks: HashMap<ListId, Vec<RawTask>>,
    list_names: HashMap<ListId, String>,
    folder_names: HashMap<FolderId, String>,
    space_names: HashMap<SpaceId, String>,
    lookups: LookupCounts,
}

impl InMemoryTaskSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn populate(self, apply: impl FnOnce(&mut InMemorySourceState)) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut state);
        }
        self
    }

    /// Adds a team.
    #[must_use]
    pub fn with_team(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let team = Team {
            id: TeamId::new(id),
            name: name.into(),
        };
        self.populate(|state| state.teams.push(team))
    }

    /// Adds a space to a team and registers its name.
    #[must_use]
    pub fn with_space(self, team: impl Into<String>, space: Space) -> Self {
        let team_id = TeamId::new(team);
        self.populate(|state| {
            state.space_names.insert(space.id.clone(), space.name.clone());
            state.spaces.entry(team_id).or_default().push(space);
        })
    }

    /// Adds a folder to its space and registers folder and list names.
    #[must_use]
    pub fn with_folder(self, folder: Folder) -> Self {
        self.populate(|state| {
            state
                .folder_names
                .insert(folder.id.clone(), folder.name.clone());
            for list in &folder.lists {
                state.list_names.insert(list.id.clone(), list.name.clone());
            }
            state
                .folders
                .entry(folder.space.id.clone())
                .or_default()
                .push(folder);
        })
    }

    /// Adds a group to a team.
    #[must_use]
    pub fn with_group(self, team: impl Into<String>, group: Group) -> Self {
        let team_id = TeamId::new(team);
        self.populate(|state| state.groups.entry(team_id).or_default().push(group))
    }

    /// Appends tasks to a list, keeping their order.
    #[must_use]
    pub fn with_tasks(self, list: impl Into<String>, tasks: Vec<RawTask>) -> Self {
        let list_id = ListId::new(list);
        self.populate(|state| state.tasks.entry(list_id).or_default().extend(tasks))
    }

    /// Registers a list name.
    #[must_use]
    pub fn with_list_name(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let key = ListId::new(id);
        let value = name.into();
        self.populate(|state| {
            state.list_names.insert(key, value);
        })
    }

    /// Registers a folder name.
    #[must_use]
    pub fn with_folder_name(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let key = FolderId::new(id);
        let value = name.into();
        self.populate(|state| {
            state.folder_names.insert(key, value);
        })
    }

    /// Registers a space name.
    #[must_use]
    pub fn with_space_name(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let key = SpaceId::new(id);
        let value = name.into();
        self.populate(|state| {
            state.space_names.insert(key, value);
        })
    }

    /// Returns how many name lookups have been served.
    #[must_use]
    pub fn lookup_counts(&self) -> LookupCounts {
        self.state
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().lookups, |state| state.lookups)
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskSourceError {
    TaskSourceError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn list_teams(&self) -> TaskSourceResult<Vec<Team>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.teams.clone())
    }

    async fn list_spaces(
        &self,
        team_id: &TeamId,
        archived: bool,
    ) -> TaskSourceResult<Vec<Space>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .spaces
            .get(team_id)
            .map(|spaces| {
                spaces
                    .iter()
                    .filter(|space| space.archived == archived)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_folders(&self, space_id: &SpaceId) -> TaskSourceResult<Vec<Folder>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.folders.get(space_id).cloned().unwrap_or_default())
    }

    async fn list_groups(&self, team_id: &TeamId) -> TaskSourceResult<Vec<Group>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.groups.get(team_id).cloned().unwrap_or_default())
    }

    async fn list_tasks(
        &self,
        list_id: &ListId,
        query: &TaskQuery,
    ) -> TaskSourceResult<Vec<RawTask>> {
        let state = self.state.read().map_err(lock_error)?;
        let Some(tasks) = state.tasks.get(list_id) else {
            return if state.list_names.contains_key(list_id) {
                Ok(Vec::new())
            } else {
                Err(TaskSourceError::UnknownList(list_id.clone()))
            };
        };
        let mut selected = Vec::with_capacity(tasks.len());
        for task in tasks {
            if query
                .matches(task)
                .map_err(|err| TaskSourceError::Decode(err.to_string()))?
            {
                selected.push(task.clone());
            }
        }
        Ok(selected)
    }

    async fn resolve_list_name(&self, list_id: &ListId) -> TaskSourceResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.lookups.list += 1;
        state
            .list_names
            .get(list_id)
            .cloned()
            .ok_or_else(|| TaskSourceError::UnknownList(list_id.clone()))
    }

    async fn resolve_folder_name(&self, folder_id: &FolderId) -> TaskSourceResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.lookups.folder += 1;
        state
            .folder_names
            .get(folder_id)
            .cloned()
            .ok_or_else(|| TaskSourceError::UnknownFolder(folder_id.clone()))
    }

    async fn resolve_space_name(&self, space_id: &SpaceId) -> TaskSourceResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.lookups.space += 1;
        state
            .space_names
            .get(space_id)
            .cloned()
            .ok_or_else(|| TaskSourceError::UnknownSpace(space_id.clone()))
    }
}
