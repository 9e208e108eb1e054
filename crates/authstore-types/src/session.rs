//! The `Session` relation and the composed session/user lookup result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::User;

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Primary key.
    pub id: Uuid,
    /// Opaque token held by the client. Unique.
    pub session_token: String,
    /// Owning user.
    pub user_id: Uuid,
    /// Expiry instant. Sweeping expired rows is the caller's job.
    pub expires: DateTime<Utc>,
}

/// Fields for creating a session. `id` is generated when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub session_token: String,
    pub user_id: Uuid,
    pub expires: DateTime<Utc>,
}

impl NewSession {
    /// Creates a session record with a generated id.
    pub fn new(session_token: impl Into<String>, user_id: Uuid, expires: DateTime<Utc>) -> Self {
        Self {
            id: None,
            session_token: session_token.into(),
            user_id,
            expires,
        }
    }
}

/// A partial update to a session, addressed by its token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl SessionPatch {
    /// A patch that only moves the expiry.
    pub fn extend_to(expires: DateTime<Utc>) -> Self {
        Self {
            expires: Some(expires),
            user_id: None,
        }
    }

    /// Returns `true` if the patch touches no column.
    pub fn is_empty(&self) -> bool {
        self.expires.is_none() && self.user_id.is_none()
    }
}

/// A session together with the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAndUser {
    pub session: Session,
    pub user: User,
}
