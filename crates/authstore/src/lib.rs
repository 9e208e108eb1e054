//! Composition root for the authentication store.
//!
//! Loads [`Config`], installs the tracing subscriber, opens a migrated
//! SQLite store and exposes the adapter operations as async methods on
//! [`AuthStore`].
//!
//! ```rust,ignore
//! let config = authstore::load_config(Some("authstore.toml"))?;
//! authstore::init_tracing(&config.logging)?;
//! let store = authstore::AuthStore::open(&config.database)?;
//! let user = store.get_user_by_email("ada@example.com").await?;
//! ```

pub mod config;
mod error;
mod store;
pub mod telemetry;

pub use config::{load_config, Config, ConfigError, DatabaseConfig, LoggingConfig};
pub use error::StoreError;
pub use store::AuthStore;
pub use telemetry::init_tracing;

pub use authstore_adapter::{AdapterError, AuthAdapter, ConnectionSource, ConstraintKind};
pub use authstore_types as types;
