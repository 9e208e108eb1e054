//! Verification-token operations.
//!
//! Tokens are single use: [`AuthAdapter::use_verification_token`] deletes
//! the row in the same statement that reads it, so two concurrent redeemers
//! cannot both receive it.

use authstore_types::{NewVerificationToken, VerificationToken};
use rusqlite::{params, OptionalExtension};

use crate::rows::map_verification_token;
use crate::{AdapterError, AuthAdapter, ConnectionSource};

impl<S: ConnectionSource> AuthAdapter<S> {
    /// Stores a verification token and returns it.
    ///
    /// Identifiers are unique: storing a second outstanding token for the
    /// same identifier fails with a unique-constraint error.
    pub fn create_verification_token(
        &self,
        token: &NewVerificationToken,
    ) -> Result<VerificationToken, AdapterError> {
        let created = self.source.with_connection(|conn| {
            conn.query_row(
                "INSERT INTO VerificationToken (identifier, token, expires)
                 VALUES (?1, ?2, ?3)
                 RETURNING identifier, token, expires",
                params![token.identifier, token.token, token.expires],
                map_verification_token,
            )
        })?;
        tracing::debug!(identifier = %created.identifier, "created verification token");
        Ok(created)
    }

    /// Consumes the token stored for `identifier`, returning it.
    pub fn use_verification_token(
        &self,
        identifier: &str,
    ) -> Result<Option<VerificationToken>, AdapterError> {
        let used = self.source.with_connection(|conn| {
            conn.query_row(
                "DELETE FROM VerificationToken WHERE identifier = ?1
                 RETURNING identifier, token, expires",
                [identifier],
                map_verification_token,
            )
            .optional()
        })?;
        tracing::debug!(identifier, consumed = used.is_some(), "use_verification_token");
        Ok(used)
    }
}
