//! Column lists and row mappers shared by the operation modules.
//!
//! Every mapper reads its columns starting at `offset`, so the same mapper
//! serves both single-table statements (offset 0) and joined statements
//! where a second record follows the first.

use authstore_types::{Account, Session, User, VerificationToken};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

pub(crate) fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads `id, name, email, emailVerified, image`.
pub(crate) fn user_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: uuid_at(row, offset)?,
        name: row.get(offset + 1)?,
        email: row.get(offset + 2)?,
        email_verified: row.get(offset + 3)?,
        image: row.get(offset + 4)?,
    })
}

pub(crate) fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    user_at(row, 0)
}

/// Reads `id, userId, type, provider, providerAccountId, refresh_token,
/// access_token, expires_at, token_type, scope, id_token, session_state`.
pub(crate) fn map_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: uuid_at(row, 0)?,
        user_id: uuid_at(row, 1)?,
        account_type: row.get(2)?,
        provider: row.get(3)?,
        provider_account_id: row.get(4)?,
        refresh_token: row.get(5)?,
        access_token: row.get(6)?,
        expires_at: row.get(7)?,
        token_type: row.get(8)?,
        scope: row.get(9)?,
        id_token: row.get(10)?,
        session_state: row.get(11)?,
    })
}

/// Reads `id, sessionToken, userId, expires`.
pub(crate) fn session_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Session> {
    Ok(Session {
        id: uuid_at(row, offset)?,
        session_token: row.get(offset + 1)?,
        user_id: uuid_at(row, offset + 2)?,
        expires: row.get(offset + 3)?,
    })
}

pub(crate) fn map_session(row: &Row<'_>) -> rusqlite::Result<Session> {
    session_at(row, 0)
}

/// Reads `identifier, token, expires`.
pub(crate) fn map_verification_token(row: &Row<'_>) -> rusqlite::Result<VerificationToken> {
    Ok(VerificationToken {
        identifier: row.get(0)?,
        token: row.get(1)?,
        expires: row.get(2)?,
    })
}
