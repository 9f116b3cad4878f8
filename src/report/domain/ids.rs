//! Identifier types for the workspace hierarchy.
//!
//! The task service hands out opaque string identifiers for teams, spaces,
//! folders and lists, and integer identifiers for workspace members.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! hierarchy_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

hierarchy_id!(
    /// Identifier of a team (workspace).
    TeamId
);
hierarchy_id!(
    /// Identifier of a space within a team.
    SpaceId
);
hierarchy_id!(
    /// Identifier of a folder within a space.
    FolderId
);
hierarchy_id!(
    /// Identifier of a list within a folder.
    ListId
);
hierarchy_id!(
    /// Identifier of a task.
    TaskId
);
hierarchy_id!(
    /// Identifier of a user group.
    GroupId
);

/// Identifier of a workspace member (task creator, assignee, group member).
///
/// Deserializes from either a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MemberId(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMemberId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RawMemberId::deserialize(deserializer)? {
            RawMemberId::Number(value) => Ok(Self(value)),
            RawMemberId::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl MemberId {
    /// Wraps a raw member identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
