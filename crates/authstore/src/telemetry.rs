//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::StoreError;

/// Installs the global `fmt` subscriber described by `config`.
///
/// An unparsable `level` falls back to `info`.
///
/// # Errors
///
/// Returns `StoreError::Telemetry` if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), StoreError> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    installed.map_err(StoreError::Telemetry)
}
