//! User profile record.
//!
//! Mirrors a row of the hosted `users` table, joined with the owning family's
//! id and name. The application reads these records but never writes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ColorTag, Email, FamilyId, MemberRole, UserId};

/// Reference to the family that owns a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRef {
    pub id: FamilyId,
    pub name: String,
}

/// A family member's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Same ID as the member's auth user.
    pub id: UserId,
    pub family_id: FamilyId,
    pub email: Email,
    /// Display name.
    pub name: String,
    pub role: MemberRole,
    #[serde(default)]
    pub color: ColorTag,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` until the member has signed in at least once.
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    pub family: FamilyRef,
}

impl UserProfile {
    /// First word of the display name, for greetings.
    ///
    /// Falls back to the email's local part when the name is blank.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name
            .split_whitespace()
            .next()
            .unwrap_or_else(|| self.email.local_part())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": "0b6f8a52-3c1d-4e2f-9a7b-5c8d9e0f1a2b",
            "family_id": "7d3e1f20-4b5c-4a6d-8e9f-0a1b2c3d4e5f",
            "email": "alex@family.example",
            "name": "Alex Rivera",
            "role": "parent",
            "color": "green",
            "is_active": true,
            "created_at": "2025-01-04T09:30:00Z",
            "updated_at": "2025-02-11T18:02:45.120Z",
            "last_seen": null,
            "family": {
                "id": "7d3e1f20-4b5c-4a6d-8e9f-0a1b2c3d4e5f",
                "name": "The Riveras"
            }
        })
    }

    #[test]
    fn test_deserialize_provider_row() {
        let profile: UserProfile = serde_json::from_value(sample_json()).unwrap();

        assert_eq!(profile.name, "Alex Rivera");
        assert_eq!(profile.role, MemberRole::Parent);
        assert_eq!(profile.color.as_str(), "green");
        assert!(profile.is_active);
        assert!(profile.last_seen.is_none());
        assert_eq!(profile.family.name, "The Riveras");
        assert_eq!(profile.family.id, profile.family_id);
    }

    #[test]
    fn test_missing_color_defaults() {
        let mut json = sample_json();
        json.as_object_mut().unwrap().remove("color");
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.color, ColorTag::default());
    }

    #[test]
    fn test_first_name() {
        let mut profile: UserProfile = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(profile.first_name(), "Alex");

        profile.name = "   ".to_string();
        assert_eq!(profile.first_name(), "alex");
    }
}
