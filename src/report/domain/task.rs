//! Raw task records and hierarchy payloads as delivered by the task service.
//!
//! These are immutable snapshots; the report pipeline never mutates them.

use super::{CustomField, EpochValue, FolderId, ListId, MemberId, SpaceId, TaskId, TeamId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Workflow status label.
    pub status: String,
    /// Status category, e.g. `open`, `custom`, `closed`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl TaskStatus {
    /// Status category of closed tasks.
    pub const CLOSED: &'static str = "closed";

    /// Returns `true` when the status category is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.kind == Self::CLOSED
    }
}

/// Workspace member reference (creator or assignee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    /// Member identifier.
    pub id: MemberId,
    /// Display username.
    #[serde(default)]
    pub username: Option<String>,
}

impl MemberRef {
    /// Creates a member reference.
    #[must_use]
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(id),
            username: Some(username.into()),
        }
    }
}

/// Reference to a hierarchy container embedded in a task.
///
/// The embedded name is not authoritative and is resolved separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef<Id> {
    /// Container identifier.
    pub id: Id,
    /// Embedded name, if the service sent one.
    #[serde(default)]
    pub name: Option<String>,
}

impl<Id> ContainerRef<Id> {
    /// Creates a reference without an embedded name.
    #[must_use]
    pub const fn new(id: Id) -> Self {
        Self { id, name: None }
    }
}

/// Raw task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub name: String,
    /// Plain-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp.
    #[serde(default)]
    pub date_created: Option<EpochValue>,
    /// Last update timestamp.
    #[serde(default)]
    pub date_updated: Option<EpochValue>,
    /// Closing timestamp.
    #[serde(default)]
    pub date_closed: Option<EpochValue>,
    /// Planned start.
    #[serde(default)]
    pub start_date: Option<EpochValue>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<EpochValue>,
    /// Task creator.
    pub creator: MemberRef,
    /// Parent task for subtasks.
    #[serde(default)]
    pub parent: Option<TaskId>,
    /// Whether the task is archived.
    #[serde(default)]
    pub archived: bool,
    /// Containing list.
    pub list: ContainerRef<ListId>,
    /// Containing folder.
    pub folder: ContainerRef<FolderId>,
    /// Containing space.
    pub space: ContainerRef<SpaceId>,
    /// Custom fields in service order.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Assignees in service order.
    #[serde(default)]
    pub assignees: Vec<MemberRef>,
}

/// Team (workspace) summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Team name.
    pub name: String,
}

/// Space within a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Space identifier.
    pub id: SpaceId,
    /// Space name.
    pub name: String,
    /// Whether the space is archived.
    #[serde(default)]
    pub archived: bool,
}

/// List as embedded in a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// List identifier.
    pub id: ListId,
    /// List name.
    pub name: String,
    /// Task count as reported by the service.
    #[serde(default)]
    pub task_count: Option<Value>,
}

/// Folder within a space, with its lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Task count as reported by the service.
    #[serde(default)]
    pub task_count: Option<Value>,
    /// Containing space.
    pub space: ContainerRef<SpaceId>,
    /// Lists inside the folder.
    #[serde(default)]
    pub lists: Vec<ListEntry>,
}

/// Returns the first team named exactly `name`.
#[must_use]
pub fn select_team<'a>(teams: &'a [Team], name: &str) -> Option<&'a Team> {
    teams.iter().find(|team| team.name == name)
}
