//! Flat report rows.
//!
//! Field names are the report column names; downstream spreadsheets depend
//! on them verbatim.

use super::{
    CustomFieldProjection, DATE_FORMAT, DEFAULT_FORMAT, Folder, FolderId, GroupMembershipIndex,
    ListId, MemberId, RawTask, Space, SpaceId, TaskId, TimestampError, epoch_to_date_string,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved display names of a task's containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNames {
    /// List name.
    pub list: String,
    /// Folder name.
    pub folder: String,
    /// Space name.
    pub space: String,
}

/// One task for one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTaskRow {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task title.
    pub task_name: String,
    /// Task description.
    pub task_description: Option<String>,
    /// Resolved "Type" label.
    pub task_type: Option<String>,
    /// Workflow status label.
    pub task_status: String,
    /// Status category.
    pub task_status_type: String,
    /// Creation time.
    pub task_created: String,
    /// Last update time.
    pub task_updated: String,
    /// Closing time.
    pub task_closed: String,
    /// Planned start time.
    pub task_start: String,
    /// Due date, date-only.
    pub task_due: String,
    /// Creator identifier.
    pub creator_id: MemberId,
    /// Creator username.
    pub creator: Option<String>,
    /// Parent task for subtasks.
    pub parent: Option<TaskId>,
    /// List identifier.
    pub list_id: ListId,
    /// Resolved list name.
    pub list_name: String,
    /// Folder identifier.
    pub folder_id: FolderId,
    /// Resolved folder name.
    pub folder_name: String,
    /// Space identifier.
    pub space_id: SpaceId,
    /// Resolved space name.
    pub space_name: String,
    /// Raw job number.
    pub job_no: Option<Value>,
    /// Submission date, date-only.
    pub submit_date: String,
    /// Raw post URL.
    pub post_url: Option<Value>,
    /// Assignee identifier; `None` for unassigned tasks.
    pub assignee_id: Option<MemberId>,
    /// Assignee username.
    pub assignee: Option<String>,
    /// Assignee's group name.
    pub group: Option<String>,
}

impl FlatTaskRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 26] = [
        "task_id",
        "task_name",
        "task_description",
        "task_type",
        "task_status",
        "task_status_type",
        "task_created",
        "task_updated",
        "task_closed",
        "task_start",
        "task_due",
        "creator_id",
        "creator",
        "parent",
        "list_id",
        "list_name",
        "folder_id",
        "folder_name",
        "space_id",
        "space_name",
        "job_no",
        "submit_date",
        "post_url",
        "assignee_id",
        "assignee",
        "group",
    ];

    /// Builds the unassigned row for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when a task timestamp is malformed.
    pub fn base(
        task: &RawTask,
        names: HierarchyNames,
        fields: CustomFieldProjection,
    ) -> Result<Self, TimestampError> {
        Ok(Self {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            task_description: task.description.clone(),
            task_type: fields.task_type,
            task_status: task.status.status.clone(),
            task_status_type: task.status.kind.clone(),
            task_created: epoch_to_date_string(task.date_created.as_ref(), DEFAULT_FORMAT)?,
            task_updated: epoch_to_date_string(task.date_updated.as_ref(), DEFAULT_FORMAT)?,
            task_closed: epoch_to_date_string(task.date_closed.as_ref(), DEFAULT_FORMAT)?,
            task_start: epoch_to_date_string(task.start_date.as_ref(), DEFAULT_FORMAT)?,
            task_due: epoch_to_date_string(task.due_date.as_ref(), DATE_FORMAT)?,
            creator_id: task.creator.id,
            creator: task.creator.username.clone(),
            parent: task.parent.clone(),
            list_id: task.list.id.clone(),
            list_name: names.list,
            folder_id: task.folder.id.clone(),
            folder_name: names.folder,
            space_id: task.space.id.clone(),
            space_name: names.space,
            job_no: fields.job_no,
            submit_date: fields.submit_date,
            post_url: fields.post_url,
            assignee_id: None,
            assignee: None,
            group: None,
        })
    }

    /// Fans a task out into one row per assignee, or a single unassigned
    /// row when there are none. Assignee order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when a task timestamp is malformed.
    pub fn fan_out(
        task: &RawTask,
        names: HierarchyNames,
        fields: CustomFieldProjection,
        groups: &GroupMembershipIndex,
    ) -> Result<Vec<Self>, TimestampError> {
        let base = Self::base(task, names, fields)?;
        if task.assignees.is_empty() {
            return Ok(vec![base]);
        }
        Ok(task
            .assignees
            .iter()
            .map(|assignee| Self {
                assignee_id: Some(assignee.id),
                assignee: assignee.username.clone(),
                group: groups.group_name_for(assignee.id).map(str::to_owned),
                ..base.clone()
            })
            .collect())
    }
}

/// Space listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummaryRow {
    /// Space identifier.
    pub id: SpaceId,
    /// Space name.
    pub name: String,
    /// Whether the space is archived.
    pub archived: bool,
}

impl From<Space> for SpaceSummaryRow {
    fn from(space: Space) -> Self {
        Self {
            id: space.id,
            name: space.name,
            archived: space.archived,
        }
    }
}

/// Folder/list listing row; one per list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummaryRow {
    /// Folder identifier.
    pub folder_id: FolderId,
    /// Folder name.
    pub folder_name: String,
    /// Folder task count.
    pub folder_task_count: Option<Value>,
    /// Space name.
    pub space_name: Option<String>,
    /// Space identifier.
    pub space_id: SpaceId,
    /// List identifier.
    pub list_id: ListId,
    /// List name.
    pub list_name: String,
    /// List task count.
    pub list_task_count: Option<Value>,
}

impl ListSummaryRow {
    /// Flattens folders into one row per contained list. Folders without
    /// lists produce no rows.
    #[must_use]
    pub fn from_folders(folders: &[Folder]) -> Vec<Self> {
        folders
            .iter()
            .flat_map(|folder| {
                folder.lists.iter().map(move |list| Self {
                    folder_id: folder.id.clone(),
                    folder_name: folder.name.clone(),
                    folder_task_count: folder.task_count.clone(),
                    space_name: folder.space.name.clone(),
                    space_id: folder.space.id.clone(),
                    list_id: list.id.clone(),
                    list_name: list.name.clone(),
                    list_task_count: list.task_count.clone(),
                })
            })
            .collect()
    }
}
