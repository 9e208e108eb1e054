//! Error types for adapter operations.

use rusqlite::ffi;
use thiserror::Error;

/// A failure reported by the store.
///
/// The adapter never produces errors of its own; both variants wrap what
/// the store or the pool returned.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A statement failed (constraint violation, missing table, I/O, ...).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("failed to check out database connection: {0}")]
    Pool(#[from] r2d2::Error),
}

/// The kind of integrity constraint a statement violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A unique index or primary key already holds the value.
    Unique,
    /// A referenced parent row does not exist.
    ForeignKey,
    /// A required column was NULL.
    NotNull,
    /// Any other constraint (CHECK, trigger, ...).
    Other,
}

impl AdapterError {
    /// Classifies a constraint violation, or returns `None` for any other
    /// failure.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        let Self::Database(rusqlite::Error::SqliteFailure(err, _)) = self else {
            return None;
        };
        if err.code != rusqlite::ErrorCode::ConstraintViolation {
            return None;
        }
        Some(match err.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                ConstraintKind::Unique
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            _ => ConstraintKind::Other,
        })
    }

    /// Returns `true` for unique-index and primary-key violations.
    pub fn is_unique_violation(&self) -> bool {
        self.constraint_kind() == Some(ConstraintKind::Unique)
    }

    /// Returns `true` when a referenced parent row is missing.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.constraint_kind() == Some(ConstraintKind::ForeignKey)
    }
}
