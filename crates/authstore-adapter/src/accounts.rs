//! Account-link operations.
//!
//! An account is addressed by the `(provider, providerAccountId)` pair; the
//! provider-assigned id alone is not unique across providers.

use authstore_types::{Account, NewAccount, User};
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::rows::{map_account, map_user};
use crate::{AdapterError, AuthAdapter, ConnectionSource};

const ACCOUNT_SELECT: &str = "id, userId, type, provider, providerAccountId, refresh_token, \
     access_token, expires_at, token_type, scope, id_token, session_state";

impl<S: ConnectionSource> AuthAdapter<S> {
    /// Links a provider account to a user and returns the stored row.
    ///
    /// Fails with a unique-constraint error if the pair is already linked,
    /// and with a foreign-key error if `account.user_id` names no user.
    pub fn link_account(&self, account: &NewAccount) -> Result<Account, AdapterError> {
        let id = account.id.unwrap_or_else(Uuid::new_v4);
        let linked = self.source.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO Account (
                        id, userId, type, provider, providerAccountId, refresh_token,
                        access_token, expires_at, token_type, scope, id_token, session_state
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                    RETURNING {ACCOUNT_SELECT}"
                ),
                params![
                    id.to_string(),
                    account.user_id.to_string(),
                    account.account_type,
                    account.provider,
                    account.provider_account_id,
                    account.refresh_token,
                    account.access_token,
                    account.expires_at,
                    account.token_type,
                    account.scope,
                    account.id_token,
                    account.session_state,
                ],
                map_account,
            )
        })?;
        tracing::debug!(
            account_id = %linked.id,
            user_id = %linked.user_id,
            provider = %linked.provider,
            "linked account"
        );
        Ok(linked)
    }

    /// Returns the account row linked under `(provider, provider_account_id)`.
    pub fn get_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, AdapterError> {
        let account = self.source.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {ACCOUNT_SELECT} FROM Account
                     WHERE provider = ?1 AND providerAccountId = ?2"
                ),
                params![provider, provider_account_id],
                map_account,
            )
            .optional()
        })?;
        tracing::debug!(provider, found = account.is_some(), "get_account");
        Ok(account)
    }

    /// Returns the user that owns the account linked under
    /// `(provider, provider_account_id)`.
    pub fn get_user_by_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, AdapterError> {
        let user = self.source.with_connection(|conn| {
            conn.query_row(
                "SELECT u.id, u.name, u.email, u.emailVerified, u.image
                 FROM Account a
                 JOIN User u ON u.id = a.userId
                 WHERE a.provider = ?1 AND a.providerAccountId = ?2",
                params![provider, provider_account_id],
                map_user,
            )
            .optional()
        })?;
        tracing::debug!(
            provider,
            user_id = ?user.as_ref().map(|u| u.id),
            "get_user_by_account"
        );
        Ok(user)
    }

    /// Removes the link for `(provider, provider_account_id)` and returns
    /// the removed row. The owning user is left in place.
    pub fn unlink_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, AdapterError> {
        let removed = self.source.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "DELETE FROM Account
                     WHERE provider = ?1 AND providerAccountId = ?2
                     RETURNING {ACCOUNT_SELECT}"
                ),
                params![provider, provider_account_id],
                map_account,
            )
            .optional()
        })?;
        if let Some(account) = &removed {
            tracing::debug!(
                account_id = %account.id,
                user_id = %account.user_id,
                provider = %account.provider,
                "unlinked account"
            );
        }
        Ok(removed)
    }
}
