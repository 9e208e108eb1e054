//! Storage layer for authstore.
//!
//! Owns the relational schema of the four auth relations (`User`, `Account`,
//! `Session`, `VerificationToken`), the embedded migrations that create it,
//! and SQLite connection pooling via `r2d2`.
//!
//! # Design decisions
//!
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, so the schema ships with the code that queries it.
//! - **Foreign keys on every connection**: SQLite leaves them off by default;
//!   [`initialize_connection`] turns them on so `Account.userId` and
//!   `Session.userId` are enforced by the store rather than the adapter.
//! - **`r2d2` connection pool**: bounded connection reuse, with every pooled
//!   connection initialised the same way as a bare one.

mod migrations;
mod pool;
pub mod schema;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, initialize_connection, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{verify_schema, SchemaError};
