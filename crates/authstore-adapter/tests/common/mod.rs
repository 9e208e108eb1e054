#![allow(dead_code)]

use authstore_adapter::AuthAdapter;
use authstore_db::run_migrations;
use authstore_types::{NewUser, User};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;

/// An adapter over a fresh, migrated in-memory database.
pub fn adapter() -> AuthAdapter<Connection> {
    let conn = Connection::open_in_memory().expect("failed to open in-memory db");
    let adapter = AuthAdapter::from_connection(conn).expect("failed to initialize connection");
    run_migrations(adapter.source()).expect("failed to run migrations");
    adapter
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        name: Some("Ada Lovelace".to_string()),
        email: Some(email.to_string()),
        ..NewUser::default()
    }
}

pub fn create_user(adapter: &AuthAdapter<Connection>, email: &str) -> User {
    adapter
        .create_user(&new_user(email))
        .expect("failed to create user")
}

pub fn count(adapter: &AuthAdapter<Connection>, table: &str) -> i64 {
    adapter
        .source()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("failed to count rows")
}
