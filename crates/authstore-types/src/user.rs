//! The `User` relation: one identity record per person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    pub id: Uuid,
    /// Display name, if known.
    pub name: Option<String>,
    /// Email address. Unique across users when present.
    pub email: Option<String>,
    /// When the email address was verified.
    pub email_verified: Option<DateTime<Utc>>,
    /// Avatar URL.
    pub image: Option<String>,
}

/// Fields for inserting a user.
///
/// When `id` is `None` the adapter generates a random UUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// A partial update to a user row.
///
/// Outer `None` leaves a column untouched; `Some(None)` sets it to NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(
        default,
        deserialize_with = "crate::patch::deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_verified: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "crate::patch::deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

impl UserPatch {
    /// Returns `true` if the patch touches no column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.email_verified.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_serializes_with_framework_field_names() {
        let user = User {
            id: Uuid::nil(),
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            email_verified: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            image: None,
        };

        let value = serde_json::to_value(&user).expect("user should serialize");
        assert_eq!(value["email"], "ada@example.com");
        assert!(value.get("emailVerified").is_some());
        assert!(value.get("email_verified").is_none());
        assert!(value["image"].is_null());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"name": "Grace", "image": null}"#).expect("valid patch");

        assert_eq!(patch.name, Some(Some("Grace".to_string())));
        assert_eq!(patch.image, Some(None));
        assert_eq!(patch.email, None);
        assert_eq!(patch.email_verified, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_round_trips_as_empty_object() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
