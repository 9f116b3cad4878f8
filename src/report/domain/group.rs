//! User groups and the member-to-group index.

use super::{
    DATE_FORMAT, EpochValue, GroupId, MemberId, MemberRef, TimestampError, epoch_to_date_string,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User group with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Mention handle.
    #[serde(default)]
    pub handle: Option<String>,
    /// Avatar initials.
    #[serde(default)]
    pub initials: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub date_created: Option<EpochValue>,
    /// Members in service order.
    #[serde(default)]
    pub members: Vec<MemberRef>,
}

impl Group {
    /// Creates a group without handle, initials or creation date.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<MemberRef>) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            handle: None,
            initials: None,
            date_created: None,
            members,
        }
    }
}

/// Which group name wins when a member belongs to several groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTieBreak {
    /// The last group in listing order.
    #[default]
    LastWins,
    /// The first group in listing order.
    FirstWins,
}

/// Mapping from member to the names of the groups they belong to.
///
/// All memberships are retained in listing order; [`Self::group_name_for`]
/// applies the configured tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembershipIndex {
    memberships: HashMap<MemberId, Vec<String>>,
    tie_break: MembershipTieBreak,
}

impl GroupMembershipIndex {
    /// Builds the index, skipping every group named `excluded_group`.
    #[must_use]
    pub fn build(groups: &[Group], excluded_group: &str, tie_break: MembershipTieBreak) -> Self {
        let mut memberships: HashMap<MemberId, Vec<String>> = HashMap::new();
        for group in groups.iter().filter(|group| group.name != excluded_group) {
            for member in &group.members {
                memberships
                    .entry(member.id)
                    .or_default()
                    .push(group.name.clone());
            }
        }
        Self {
            memberships,
            tie_break,
        }
    }

    /// Returns the group name for a member, or `None` if they have none.
    #[must_use]
    pub fn group_name_for(&self, member: MemberId) -> Option<&str> {
        let names = self.memberships.get(&member)?;
        let chosen = match self.tie_break {
            MembershipTieBreak::LastWins => names.last(),
            MembershipTieBreak::FirstWins => names.first(),
        };
        chosen.map(String::as_str)
    }

    /// Returns every group name recorded for a member, in listing order.
    #[must_use]
    pub fn groups_for(&self, member: MemberId) -> &[String] {
        self.memberships
            .get(&member)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of indexed members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.memberships.len()
    }

    /// Returns `true` when no member is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }
}

/// One group membership, as listed in the group report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberRow {
    /// Member identifier.
    pub member_id: MemberId,
    /// Member username.
    pub username: Option<String>,
    /// Group identifier.
    pub group_id: GroupId,
    /// Group name.
    pub group_name: String,
    /// Group handle.
    pub handle: Option<String>,
    /// Group initials.
    pub initials: Option<String>,
    /// Group creation date, date-only.
    pub created_date: String,
}

impl GroupMemberRow {
    /// Flattens groups into one row per membership, skipping
    /// `excluded_group`.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when a group creation date is malformed.
    pub fn from_groups(
        groups: &[Group],
        excluded_group: &str,
    ) -> Result<Vec<Self>, TimestampError> {
        let mut rows = Vec::new();
        for group in groups.iter().filter(|group| group.name != excluded_group) {
            let created_date =
                epoch_to_date_string(group.date_created.as_ref(), DATE_FORMAT)?;
            rows.extend(group.members.iter().map(|member| Self {
                member_id: member.id,
                username: member.username.clone(),
                group_id: group.id.clone(),
                group_name: group.name.clone(),
                handle: group.handle.clone(),
                initials: group.initials.clone(),
                created_date: created_date.clone(),
            }));
        }
        Ok(rows)
    }
}
