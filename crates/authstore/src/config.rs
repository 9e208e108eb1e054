//! Store configuration loading from file and environment variables.

use authstore_db::DbRuntimeSettings;
use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "authstore_adapter=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_db_path() -> String {
    "authstore.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    DbRuntimeSettings::default().pool_max_size
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl DatabaseConfig {
    /// The pool tunables carried by this section.
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
        }
    }

    /// Whether `path` names a database private to each SQLite connection
    /// (`:memory:`, or the empty path for a temporary database).
    pub fn is_in_memory(&self) -> bool {
        self.path.is_empty() || self.path == ":memory:"
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `AUTHSTORE_DB_PATH` overrides `database.path`
/// - `AUTHSTORE_DB_BUSY_TIMEOUT_MS` overrides `database.busy_timeout_ms`
/// - `AUTHSTORE_DB_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `AUTHSTORE_LOG_LEVEL` overrides `logging.level`
/// - `AUTHSTORE_LOG_JSON` overrides `logging.json` (set to "true" or "1" to enable)
///
/// Numeric overrides that fail to parse are ignored.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], but reads overrides through `env` instead of the
/// process environment.
pub fn load_config_with_env<F>(path: Option<&str>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Some(db_path) = env("AUTHSTORE_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(timeout) = env("AUTHSTORE_DB_BUSY_TIMEOUT_MS") {
        if let Ok(parsed) = timeout.parse() {
            config.database.busy_timeout_ms = parsed;
        }
    }
    if let Some(size) = env("AUTHSTORE_DB_POOL_MAX_SIZE") {
        if let Ok(parsed) = size.parse() {
            config.database.pool_max_size = parsed;
        }
    }
    if let Some(level) = env("AUTHSTORE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("AUTHSTORE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_settings_follow_the_section() {
        let db = DatabaseConfig {
            busy_timeout_ms: 250,
            pool_max_size: 2,
            ..DatabaseConfig::default()
        };
        assert_eq!(
            db.runtime_settings(),
            DbRuntimeSettings {
                busy_timeout_ms: 250,
                pool_max_size: 2,
            }
        );
    }

    #[test]
    fn in_memory_paths_are_detected() {
        let mut db = DatabaseConfig::default();
        assert!(!db.is_in_memory());
        db.path = ":memory:".to_string();
        assert!(db.is_in_memory());
        db.path = String::new();
        assert!(db.is_in_memory());
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.database.path, "x.db");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
