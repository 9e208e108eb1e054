//! The `VerificationToken` relation: single-use tokens for passwordless and
//! email-verification flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored verification token.
///
/// Both `token` and `identifier` are unique, so an identifier has at most one
/// outstanding token at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Who the token was issued for (usually an email address).
    pub identifier: String,
    /// The token value.
    pub token: String,
    /// Expiry instant.
    pub expires: DateTime<Utc>,
}

/// Fields for issuing a verification token. Every column is caller-supplied.
pub type NewVerificationToken = VerificationToken;
