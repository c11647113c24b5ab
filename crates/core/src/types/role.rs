//! Family member roles.

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid member role: {0}")]
pub struct ParseRoleError(pub String);

/// Role of a member within their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Manages the family: invites members, assigns roles.
    Admin,
    /// Can create and assign tasks and events.
    #[default]
    Parent,
    /// Sees and completes the tasks assigned to them.
    Child,
}

impl MemberRole {
    /// Human-readable label for display in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Family admin",
            Self::Parent => "Parent",
            Self::Child => "Child",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Parent => write!(f, "parent"),
            Self::Child => write!(f, "child"),
        }
    }
}

impl std::str::FromStr for MemberRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
