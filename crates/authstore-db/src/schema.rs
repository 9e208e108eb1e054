//! Names of the stored relations and their unique indexes.
//!
//! The DDL itself lives in the embedded migrations. This module lists what
//! the adapter relies on so a database can be checked before use.

use rusqlite::{params, Connection};
use thiserror::Error;

/// Identity records.
pub const USER_TABLE: &str = "User";
/// Provider account links.
pub const ACCOUNT_TABLE: &str = "Account";
/// Login sessions.
pub const SESSION_TABLE: &str = "Session";
/// Single-use verification tokens.
pub const VERIFICATION_TOKEN_TABLE: &str = "VerificationToken";

/// Every relation the adapter queries.
pub const TABLES: &[&str] = &[
    USER_TABLE,
    ACCOUNT_TABLE,
    SESSION_TABLE,
    VERIFICATION_TOKEN_TABLE,
];

/// Unique indexes as `(table, index)` pairs.
pub const UNIQUE_INDEXES: &[(&str, &str)] = &[
    (USER_TABLE, "User_email_key"),
    (ACCOUNT_TABLE, "Account_provider_providerAccountId_key"),
    (SESSION_TABLE, "Session_sessionToken_key"),
    (VERIFICATION_TOKEN_TABLE, "VerificationToken_token_key"),
    (VERIFICATION_TOKEN_TABLE, "VerificationToken_identifier_key"),
];

/// Errors reported by [`verify_schema`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A relation is missing.
    #[error("missing table: {0}")]
    MissingTable(&'static str),

    /// A unique index is missing or is not declared unique.
    #[error("missing unique index {index} on {table}")]
    MissingIndex {
        /// The table the index belongs to.
        table: &'static str,
        /// The expected index name.
        index: &'static str,
    },

    /// Reading the catalog failed.
    #[error("failed to inspect schema: {0}")]
    Inspect(#[from] rusqlite::Error),
}

/// Checks that every relation and unique index the adapter depends on exists.
///
/// # Errors
///
/// Returns the first missing table or index, or `SchemaError::Inspect` if the
/// catalog cannot be read.
pub fn verify_schema(conn: &Connection) -> Result<(), SchemaError> {
    for &table in TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            tracing::warn!(table, "schema verification failed: table missing");
            return Err(SchemaError::MissingTable(table));
        }
    }

    for &(table, index) in UNIQUE_INDEXES {
        // pragma_index_list reports `unique` = 1 for UNIQUE indexes.
        let unique: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pragma_index_list(?1) WHERE name = ?2 AND \"unique\" = 1)",
            params![table, index],
            |row| row.get(0),
        )?;
        if !unique {
            tracing::warn!(table, index, "schema verification failed: index missing");
            return Err(SchemaError::MissingIndex { table, index });
        }
    }

    Ok(())
}
