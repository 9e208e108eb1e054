//! Embedded SQL migration runner.
//!
//! Migrations are SQL files embedded at compile time. They run sequentially,
//! tracked by the `_authstore_migrations` table. A migration and its tracking
//! row commit together, so a migration is either fully applied and recorded
//! or not applied at all.

use std::collections::HashSet;

use rusqlite::Connection;
use thiserror::Error;

/// A single embedded migration.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. New migrations are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "001_users",
        sql: include_str!("migrations/001_users.sql"),
    },
    Migration {
        name: "002_accounts",
        sql: include_str!("migrations/002_accounts.sql"),
    },
    Migration {
        name: "003_sessions",
        sql: include_str!("migrations/003_sessions.sql"),
    },
    Migration {
        name: "004_verification_tokens",
        sql: include_str!("migrations/004_verification_tokens.sql"),
    },
];

/// Errors that can occur during migration execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

impl MigrationError {
    fn execution(name: &str, source: rusqlite::Error) -> Self {
        Self::ExecutionFailed {
            name: name.to_string(),
            source,
        }
    }
}

/// Runs all pending migrations against the given connection.
///
/// Returns the number of migrations applied by this call; `0` means the
/// schema was already current.
///
/// # Errors
///
/// Returns `MigrationError` if any migration fails to execute or if the
/// migration tracking table cannot be queried.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _authstore_migrations (
            name TEXT PRIMARY KEY NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(MigrationError::StateQuery)?;

    let recorded = applied_names(conn).map_err(MigrationError::StateQuery)?;
    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| !recorded.contains(m.name))
        .collect();

    for migration in &pending {
        apply(conn, migration).map_err(|e| MigrationError::execution(migration.name, e))?;
    }

    Ok(pending.len())
}

fn applied_names(conn: &Connection) -> rusqlite::Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM _authstore_migrations")?;
    let names = stmt.query_map([], |row| row.get(0))?;
    names.collect()
}

/// Applies one migration and records it in the same transaction.
fn apply(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    tracing::info!(migration = migration.name, "applying migration");
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO _authstore_migrations (name) VALUES (?1)",
        [migration.name],
    )?;
    tx.commit()
}
