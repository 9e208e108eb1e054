//! Storage adapter for an identity/session framework.
//!
//! [`AuthAdapter`] maps the framework's storage contract (user, account
//! link, session and verification-token CRUD) onto the relations created by
//! `authstore-db`. Every operation is a single SQL statement; mutations use
//! `RETURNING` so callers get the affected row without a follow-up read.
//!
//! # Contract
//!
//! - "No matching row" is `Ok(None)`, never an error.
//! - Store failures (constraint violations, connection problems) are
//!   propagated unmodified as [`AdapterError`]; use
//!   [`AdapterError::constraint_kind`] to tell a unique clash from a missing
//!   parent row.
//! - The adapter validates nothing and retries nothing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use authstore_adapter::AuthAdapter;
//! use authstore_types::NewUser;
//!
//! let adapter = AuthAdapter::new(pool);
//! let user = adapter.create_user(&NewUser {
//!     email: Some("ada@example.com".into()),
//!     ..NewUser::default()
//! })?;
//! assert_eq!(adapter.get_user(user.id)?, Some(user));
//! ```

mod accounts;
mod assignments;
mod error;
mod rows;
mod sessions;
mod source;
mod users;
mod verification;

pub use error::{AdapterError, ConstraintKind};
pub use source::ConnectionSource;

use authstore_db::{initialize_connection, DbPool, DbRuntimeSettings};
use rusqlite::Connection;

/// The storage adapter.
///
/// Holds the injected connection source and nothing else; two adapters over
/// the same pool share no state beyond the database itself.
#[derive(Debug, Clone)]
pub struct AuthAdapter<S = DbPool> {
    source: S,
}

impl<S: ConnectionSource> AuthAdapter<S> {
    /// Creates an adapter that runs its statements through `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the connection source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the adapter, returning the connection source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl AuthAdapter<Connection> {
    /// Wraps a bare connection after running [`initialize_connection`] on
    /// it, so foreign keys are enforced and user deletion cascades.
    ///
    /// Prefer this over [`AuthAdapter::new`] for connections that did not
    /// come from [`authstore_db::create_pool`].
    pub fn from_connection(conn: Connection) -> Result<Self, AdapterError> {
        initialize_connection(&conn, DbRuntimeSettings::default())?;
        Ok(Self::new(conn))
    }
}
