//! User operations.

use authstore_types::{NewUser, User, UserPatch};
use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::assignments::Assignments;
use crate::rows::map_user;
use crate::{AdapterError, AuthAdapter, ConnectionSource};

const USER_SELECT: &str = "id, name, email, emailVerified, image";

impl<S: ConnectionSource> AuthAdapter<S> {
    /// Inserts a user and returns the stored row.
    ///
    /// A random id is generated when `user.id` is `None`. A duplicate email
    /// surfaces as a unique-constraint [`AdapterError`].
    pub fn create_user(&self, user: &NewUser) -> Result<User, AdapterError> {
        let id = user.id.unwrap_or_else(Uuid::new_v4);
        let created = self.source.with_connection(|conn| {
            conn.query_row(
                "INSERT INTO User (id, name, email, emailVerified, image)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, name, email, emailVerified, image",
                params![
                    id.to_string(),
                    user.name,
                    user.email,
                    user.email_verified,
                    user.image,
                ],
                map_user,
            )
        })?;
        tracing::debug!(user_id = %created.id, "created user");
        Ok(created)
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, AdapterError> {
        let user = self.source.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {USER_SELECT} FROM User WHERE id = ?1"),
                [id.to_string()],
                map_user,
            )
            .optional()
        })?;
        tracing::debug!(user_id = %id, found = user.is_some(), "get_user");
        Ok(user)
    }

    /// Looks a user up by exact, case-sensitive email match.
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AdapterError> {
        let user = self.source.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {USER_SELECT} FROM User WHERE email = ?1"),
                [email],
                map_user,
            )
            .optional()
        })?;
        tracing::debug!(user_id = ?user.as_ref().map(|u| u.id), "get_user_by_email");
        Ok(user)
    }

    /// Applies `patch` to the user with `id` in a single `UPDATE` and
    /// returns the updated row, or `None` if no such user exists.
    ///
    /// An empty patch changes nothing and returns the current row.
    pub fn update_user(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, AdapterError> {
        let mut assignments = Assignments::new();
        if let Some(name) = &patch.name {
            assignments.set("name", name.clone());
        }
        if let Some(email) = &patch.email {
            assignments.set("email", email.clone());
        }
        if let Some(email_verified) = patch.email_verified {
            assignments.set("emailVerified", email_verified);
        }
        if let Some(image) = &patch.image {
            assignments.set("image", image.clone());
        }

        if assignments.is_empty() {
            return self.get_user(id);
        }

        let (sql, values) = assignments.into_update("User", "id", id.to_string(), USER_SELECT);
        let updated = self.source.with_connection(|conn| {
            let param_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            conn.query_row(&sql, param_refs.as_slice(), map_user)
                .optional()
        })?;
        if updated.is_some() {
            tracing::debug!(user_id = %id, "updated user");
        }
        Ok(updated)
    }

    /// Deletes the user with `id` and returns the removed row.
    ///
    /// The user's accounts and sessions are removed with it by the
    /// schema's cascading foreign keys.
    pub fn delete_user(&self, id: Uuid) -> Result<Option<User>, AdapterError> {
        let deleted = self.source.with_connection(|conn| {
            conn.query_row(
                &format!("DELETE FROM User WHERE id = ?1 RETURNING {USER_SELECT}"),
                [id.to_string()],
                map_user,
            )
            .optional()
        })?;
        if deleted.is_some() {
            tracing::debug!(user_id = %id, "deleted user");
        }
        Ok(deleted)
    }
}
