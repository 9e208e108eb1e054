use authstore_adapter::AdapterError;
use authstore_db::{MigrationError, PoolError, SchemaError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the store facade.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configuration file could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// No connection was available to run migrations on.
    #[error("failed to check out connection for migrations: {0}")]
    Checkout(#[from] r2d2::Error),

    /// A migration failed; nothing from it was committed.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// A relation or unique index is missing after migrations.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An adapter operation failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The blocking task running an operation panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl StoreError {
    /// Returns the adapter error, if this is one.
    pub fn as_adapter(&self) -> Option<&AdapterError> {
        match self {
            Self::Adapter(e) => Some(e),
            _ => None,
        }
    }
}
