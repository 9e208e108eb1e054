//! The query interface the adapter runs on.

use authstore_db::DbPool;
use rusqlite::Connection;

use crate::AdapterError;

/// Lends a SQLite connection for the duration of one closure.
///
/// This is the only seam between the adapter and the store. Implementations
/// exist for a pool (one checkout per call) and for a bare connection, which
/// is what tests and single-connection embedders use.
pub trait ConnectionSource {
    /// Runs `f` against a connection and returns its result.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Pool` if no connection is available, or
    /// `AdapterError::Database` if `f` fails.
    fn with_connection<T, F>(&self, f: F) -> Result<T, AdapterError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>;
}

impl ConnectionSource for DbPool {
    fn with_connection<T, F>(&self, f: F) -> Result<T, AdapterError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.get()?;
        Ok(f(&*conn)?)
    }
}

/// Uses the connection as-is. It must already have been through
/// `authstore_db::initialize_connection`, otherwise SQLite leaves foreign
/// keys off; [`AuthAdapter::from_connection`](crate::AuthAdapter::from_connection)
/// does that step.
impl ConnectionSource for Connection {
    fn with_connection<T, F>(&self, f: F) -> Result<T, AdapterError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        Ok(f(self)?)
    }
}

impl<S: ConnectionSource> ConnectionSource for &S {
    fn with_connection<T, F>(&self, f: F) -> Result<T, AdapterError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        (**self).with_connection(f)
    }
}

impl<S: ConnectionSource> ConnectionSource for std::sync::Arc<S> {
    fn with_connection<T, F>(&self, f: F) -> Result<T, AdapterError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        (**self).with_connection(f)
    }
}
