//! Domain model for task report generation.
//!
//! Raw task snapshots, custom-field projection, the group membership index
//! and flat report rows. Nothing here performs I/O.

mod config;
mod custom_field;
mod error;
mod group;
mod ids;
mod query;
mod row;
mod task;
mod timestamp;

pub use config::ReportConfig;
pub use custom_field::{
    CustomField, CustomFieldProjection, FieldOption, JOB_NUMBER_FIELD, POST_URL_FIELD,
    SUBMIT_DATE_FIELD, TYPE_FIELD, TypeConfig, TypeOptionsSource, find_field_value,
    find_job_number, find_post_url, find_submit_date, resolve_type_name,
};
pub use error::TimestampError;
pub use group::{Group, GroupMemberRow, GroupMembershipIndex, MembershipTieBreak};
pub use ids::{FolderId, GroupId, ListId, MemberId, SpaceId, TaskId, TeamId};
pub use query::{DateBounds, TaskFilters, TaskQuery, first_day_of_current_year, today};
pub use row::{FlatTaskRow, HierarchyNames, ListSummaryRow, SpaceSummaryRow};
pub use task::{
    ContainerRef, Folder, ListEntry, MemberRef, RawTask, Space, TaskStatus, Team, select_team,
};
pub use timestamp::{
    DATE_FORMAT, DEFAULT_FORMAT, EpochValue, MILLIS_THRESHOLD, MISSING_TIMESTAMP,
    date_to_epoch_seconds, date_to_epoch_seconds_in, epoch_to_date_string,
    epoch_to_date_string_in,
};
