//! Session operations.

use authstore_types::{NewSession, Session, SessionAndUser, SessionPatch};
use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::assignments::Assignments;
use crate::rows::{map_session, session_at, user_at};
use crate::{AdapterError, AuthAdapter, ConnectionSource};

const SESSION_SELECT: &str = "id, sessionToken, userId, expires";
const SESSION_COLUMNS: usize = 4;

impl<S: ConnectionSource> AuthAdapter<S> {
    /// Inserts a session and returns the stored row.
    pub fn create_session(&self, session: &NewSession) -> Result<Session, AdapterError> {
        let id = session.id.unwrap_or_else(Uuid::new_v4);
        let created = self.source.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO Session (id, sessionToken, userId, expires)
                     VALUES (?1, ?2, ?3, ?4)
                     RETURNING {SESSION_SELECT}"
                ),
                params![
                    id.to_string(),
                    session.session_token,
                    session.user_id.to_string(),
                    session.expires,
                ],
                map_session,
            )
        })?;
        tracing::debug!(session_id = %created.id, user_id = %created.user_id, "created session");
        Ok(created)
    }

    /// Returns the session for `session_token` together with its user.
    ///
    /// Expired sessions are returned as-is; expiry is the caller's
    /// concern.
    pub fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionAndUser>, AdapterError> {
        let found = self.source.with_connection(|conn| {
            conn.query_row(
                "SELECT s.id, s.sessionToken, s.userId, s.expires,
                        u.id, u.name, u.email, u.emailVerified, u.image
                 FROM Session s
                 JOIN User u ON u.id = s.userId
                 WHERE s.sessionToken = ?1",
                [session_token],
                |row| {
                    Ok(SessionAndUser {
                        session: session_at(row, 0)?,
                        user: user_at(row, SESSION_COLUMNS)?,
                    })
                },
            )
            .optional()
        })?;
        tracing::debug!(
            session_id = ?found.as_ref().map(|f| f.session.id),
            "get_session_and_user"
        );
        Ok(found)
    }

    /// Applies `patch` to the session addressed by `session_token`.
    ///
    /// Returns `None` if no such session exists. An empty patch changes
    /// nothing and returns the current row.
    pub fn update_session(
        &self,
        session_token: &str,
        patch: &SessionPatch,
    ) -> Result<Option<Session>, AdapterError> {
        let mut assignments = Assignments::new();
        if let Some(expires) = patch.expires {
            assignments.set("expires", expires);
        }
        if let Some(user_id) = patch.user_id {
            assignments.set("userId", user_id.to_string());
        }

        let updated = if assignments.is_empty() {
            self.source.with_connection(|conn| {
                conn.query_row(
                    &format!("SELECT {SESSION_SELECT} FROM Session WHERE sessionToken = ?1"),
                    [session_token],
                    map_session,
                )
                .optional()
            })?
        } else {
            let (sql, values) = assignments.into_update(
                "Session",
                "sessionToken",
                session_token.to_string(),
                SESSION_SELECT,
            );
            self.source.with_connection(|conn| {
                let param_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
                conn.query_row(&sql, param_refs.as_slice(), map_session)
                    .optional()
            })?
        };
        if let Some(session) = &updated {
            tracing::debug!(session_id = %session.id, "updated session");
        }
        Ok(updated)
    }

    /// Deletes the session for `session_token` and returns the removed row.
    pub fn delete_session(&self, session_token: &str) -> Result<Option<Session>, AdapterError> {
        let deleted = self.source.with_connection(|conn| {
            conn.query_row(
                &format!("DELETE FROM Session WHERE sessionToken = ?1 RETURNING {SESSION_SELECT}"),
                [session_token],
                map_session,
            )
            .optional()
        })?;
        if let Some(session) = &deleted {
            tracing::debug!(session_id = %session.id, user_id = %session.user_id, "deleted session");
        }
        Ok(deleted)
    }
}
