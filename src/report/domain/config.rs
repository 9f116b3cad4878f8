//! Report configuration.

use super::{MembershipTieBreak, TypeOptionsSource};
use serde::{Deserialize, Serialize};

/// Settings for a report session.
///
/// # Examples
///
/// ```
/// use taskflat::report::domain::{MembershipTieBreak, ReportConfig, TypeOptionsSource};
///
/// let config = ReportConfig::default();
/// assert_eq!(config.type_options_source, TypeOptionsSource::SameField);
///
/// let parity = ReportConfig::source_parity();
/// assert_eq!(parity.type_options_source, TypeOptionsSource::FirstField);
/// assert_eq!(parity.membership_tie_break, MembershipTieBreak::FirstWins);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Name of the team whose groups feed the membership index.
    pub workspace_name: String,
    /// Group left out of the membership index and group listing.
    pub excluded_group_name: String,
    /// Option list used to resolve the "Type" field.
    pub type_options_source: TypeOptionsSource,
    /// Group chosen for members of several groups.
    pub membership_tie_break: MembershipTieBreak,
    /// Entries kept per hierarchy level in the name cache.
    pub hierarchy_cache_capacity: usize,
    /// Include subtasks in task listings.
    pub include_subtasks: bool,
    /// Include closed tasks in task listings.
    pub include_closed: bool,
    /// Include archived tasks in task listings.
    pub include_archived: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            workspace_name: "BrandBaker".to_owned(),
            excluded_group_name: "Camp Ranger".to_owned(),
            type_options_source: TypeOptionsSource::SameField,
            membership_tie_break: MembershipTieBreak::LastWins,
            hierarchy_cache_capacity: 256,
            include_subtasks: true,
            include_closed: true,
            include_archived: false,
        }
    }
}

impl ReportConfig {
    /// Configuration that reproduces the legacy spreadsheet exports: the
    /// first-field "Type" lookup and first-group membership.
    #[must_use]
    pub fn source_parity() -> Self {
        Self {
            type_options_source: TypeOptionsSource::FirstField,
            membership_tie_break: MembershipTieBreak::FirstWins,
            ..Self::default()
        }
    }

    /// Sets the workspace name.
    #[must_use]
    pub fn with_workspace_name(mut self, name: impl Into<String>) -> Self {
        self.workspace_name = name.into();
        self
    }

    /// Sets the excluded group name.
    #[must_use]
    pub fn with_excluded_group_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_group_name = name.into();
        self
    }

    /// Sets the "Type" option source.
    #[must_use]
    pub const fn with_type_options_source(mut self, source: TypeOptionsSource) -> Self {
        self.type_options_source = source;
        self
    }

    /// Sets the membership tie-break.
    #[must_use]
    pub const fn with_membership_tie_break(mut self, tie_break: MembershipTieBreak) -> Self {
        self.membership_tie_break = tie_break;
        self
    }

    /// Sets the per-level hierarchy cache capacity.
    #[must_use]
    pub const fn with_hierarchy_cache_capacity(mut self, capacity: usize) -> Self {
        self.hierarchy_cache_capacity = capacity;
        self
    }

    /// Sets whether subtasks are listed.
    #[must_use]
    pub const fn with_subtasks(mut self, include: bool) -> Self {
        self.include_subtasks = include;
        self
    }

    /// Parses a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the document is not valid JSON or
    /// a value has the wrong type.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}
