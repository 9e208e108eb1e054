//! The async store facade.

use authstore_adapter::{AdapterError, AuthAdapter};
use authstore_db::{create_pool, run_migrations, verify_schema, DbPool};
use authstore_types::{
    Account, NewAccount, NewSession, NewUser, NewVerificationToken, Session, SessionAndUser,
    SessionPatch, User, UserPatch, VerificationToken,
};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::StoreError;

/// A migrated, pooled store with async operations.
///
/// Every method runs its adapter call on tokio's blocking pool, so a call is
/// one suspend point wrapping one statement. Cloning is cheap; clones share
/// the pool.
#[derive(Clone)]
pub struct AuthStore {
    adapter: AuthAdapter<DbPool>,
}

impl AuthStore {
    /// Creates the pool, applies pending migrations and verifies the schema.
    ///
    /// Blocks while doing so; call it before entering hot async paths or
    /// from `spawn_blocking`.
    ///
    /// An in-memory database exists only on the connection that opened it,
    /// so for such paths the pool is capped at one connection and every
    /// operation runs against the migrated database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the pool cannot be built, a migration fails or
    /// a relation or unique index is missing afterwards.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut settings = config.runtime_settings();
        if config.is_in_memory() && settings.pool_max_size != 1 {
            tracing::warn!(
                requested = settings.pool_max_size,
                "in-memory database is private to one connection, limiting pool to one"
            );
            settings.pool_max_size = 1;
        }

        let pool = create_pool(&config.path, settings)?;
        {
            let conn = pool.get()?;
            let applied = run_migrations(&conn)?;
            if applied > 0 {
                tracing::info!(count = applied, "applied database migrations");
            }
            verify_schema(&conn)?;
        }
        tracing::info!(path = %config.path, "opened auth store");
        Ok(Self::from_pool(pool))
    }

    /// Wraps a pool whose database is already migrated.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            adapter: AuthAdapter::new(pool),
        }
    }

    /// The synchronous adapter behind this store.
    pub fn adapter(&self) -> &AuthAdapter<DbPool> {
        &self.adapter
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&AuthAdapter<DbPool>) -> Result<T, AdapterError> + Send + 'static,
    {
        let adapter = self.adapter.clone();
        let result = tokio::task::spawn_blocking(move || op(&adapter)).await?;
        Ok(result?)
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.run(move |a| a.create_user(&user)).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.run(move |a| a.get_user(id)).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_string();
        self.run(move |a| a.get_user_by_email(&email)).await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError> {
        self.run(move |a| a.update_user(id, &patch)).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.run(move |a| a.delete_user(id)).await
    }

    pub async fn link_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.run(move |a| a.link_account(&account)).await
    }

    pub async fn get_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, StoreError> {
        let provider = provider.to_string();
        let provider_account_id = provider_account_id.to_string();
        self.run(move |a| a.get_account(&provider, &provider_account_id))
            .await
    }

    pub async fn get_user_by_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, StoreError> {
        let provider = provider.to_string();
        let provider_account_id = provider_account_id.to_string();
        self.run(move |a| a.get_user_by_account(&provider, &provider_account_id))
            .await
    }

    pub async fn unlink_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, StoreError> {
        let provider = provider.to_string();
        let provider_account_id = provider_account_id.to_string();
        self.run(move |a| a.unlink_account(&provider, &provider_account_id))
            .await
    }

    pub async fn create_session(&self, session: NewSession) -> Result<Session, StoreError> {
        self.run(move |a| a.create_session(&session)).await
    }

    pub async fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionAndUser>, StoreError> {
        let session_token = session_token.to_string();
        self.run(move |a| a.get_session_and_user(&session_token))
            .await
    }

    pub async fn update_session(
        &self,
        session_token: &str,
        patch: SessionPatch,
    ) -> Result<Option<Session>, StoreError> {
        let session_token = session_token.to_string();
        self.run(move |a| a.update_session(&session_token, &patch))
            .await
    }

    pub async fn delete_session(&self, session_token: &str) -> Result<Option<Session>, StoreError> {
        let session_token = session_token.to_string();
        self.run(move |a| a.delete_session(&session_token)).await
    }

    pub async fn create_verification_token(
        &self,
        token: NewVerificationToken,
    ) -> Result<VerificationToken, StoreError> {
        self.run(move |a| a.create_verification_token(&token)).await
    }

    pub async fn use_verification_token(
        &self,
        identifier: &str,
    ) -> Result<Option<VerificationToken>, StoreError> {
        let identifier = identifier.to_string();
        self.run(move |a| a.use_verification_token(&identifier))
            .await
    }
}
