mod common;

use authstore_adapter::AuthAdapter;
use authstore_db::run_migrations;
use authstore_types::{NewAccount, NewSession, NewUser};
use rusqlite::Connection;
use common::{adapter, at, count, create_user};
use uuid::Uuid;

#[test]
fn link_then_resolve_owner() {
    let adapter = adapter();
    let user = create_user(&adapter, "owner@example.com");

    let account = adapter
        .link_account(&NewAccount {
            access_token: Some("at-1".to_string()),
            expires_at: Some(at(2030, 1, 1)),
            scope: Some("openid email".to_string()),
            ..NewAccount::new(user.id, "oauth", "github", "gh-42")
        })
        .expect("link_account should succeed");

    assert_eq!(account.user_id, user.id);
    assert_eq!(account.provider, "github");
    assert_eq!(account.provider_account_id, "gh-42");
    assert_eq!(account.expires_at, Some(at(2030, 1, 1)));

    let owner = adapter.get_user_by_account("github", "gh-42").unwrap();
    assert_eq!(owner, Some(user));

    let stored = adapter.get_account("github", "gh-42").unwrap();
    assert_eq!(stored, Some(account));
}

#[test]
fn lookups_require_the_full_pair() {
    let adapter = adapter();
    let alice = create_user(&adapter, "alice@example.com");
    let bob = create_user(&adapter, "bob@example.com");

    adapter
        .link_account(&NewAccount::new(alice.id, "oauth", "github", "shared-id"))
        .unwrap();
    adapter
        .link_account(&NewAccount::new(bob.id, "oauth", "gitlab", "shared-id"))
        .unwrap();

    assert_eq!(
        adapter.get_user_by_account("github", "shared-id").unwrap(),
        Some(alice)
    );
    assert_eq!(
        adapter.get_user_by_account("gitlab", "shared-id").unwrap(),
        Some(bob.clone())
    );
    assert_eq!(adapter.get_user_by_account("google", "shared-id").unwrap(), None);

    let removed = adapter
        .unlink_account("github", "shared-id")
        .unwrap()
        .expect("link should exist");
    assert_eq!(removed.provider, "github");
    assert_eq!(
        adapter.get_user_by_account("gitlab", "shared-id").unwrap(),
        Some(bob)
    );
}

#[test]
fn relinking_the_same_pair_is_a_unique_violation() {
    let adapter = adapter();
    let user = create_user(&adapter, "twice@example.com");
    let link = NewAccount::new(user.id, "oauth", "github", "gh-1");

    adapter.link_account(&link).unwrap();
    let err = adapter
        .link_account(&link)
        .expect_err("duplicate link must fail");
    assert!(err.is_unique_violation(), "unexpected error: {err}");
}

#[test]
fn linking_to_missing_user_is_a_foreign_key_violation() {
    let adapter = adapter();
    let err = adapter
        .link_account(&NewAccount::new(Uuid::new_v4(), "oauth", "github", "orphan"))
        .expect_err("orphan link must fail");
    assert!(err.is_foreign_key_violation(), "unexpected error: {err}");
}

#[test]
fn unlink_leaves_user_in_place() {
    let adapter = adapter();
    let user = create_user(&adapter, "stay@example.com");
    adapter
        .link_account(&NewAccount::new(user.id, "oauth", "github", "gh-7"))
        .unwrap();

    assert!(adapter.unlink_account("github", "gh-7").unwrap().is_some());
    assert_eq!(adapter.get_user_by_account("github", "gh-7").unwrap(), None);
    assert_eq!(adapter.get_user(user.id).unwrap(), Some(user));
    assert_eq!(adapter.unlink_account("github", "gh-7").unwrap(), None);
}

#[test]
fn deleting_user_cascades_to_accounts_and_sessions() {
    let adapter = adapter();
    let user = create_user(&adapter, "cascade@example.com");
    adapter
        .link_account(&NewAccount::new(user.id, "oauth", "github", "gh-9"))
        .unwrap();
    adapter
        .create_session(&NewSession::new("tok-cascade", user.id, at(2030, 1, 1)))
        .unwrap();

    adapter.delete_user(user.id).unwrap();

    assert_eq!(count(&adapter, "Account"), 0);
    assert_eq!(count(&adapter, "Session"), 0);
    assert_eq!(adapter.get_account("github", "gh-9").unwrap(), None);
    assert_eq!(adapter.get_session_and_user("tok-cascade").unwrap(), None);
}

#[test]
fn bare_connection_gets_foreign_keys_enforced() {
    let conn = Connection::open_in_memory().expect("failed to open in-memory db");
    let fk_before: i32 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk_before, 0, "SQLite starts with foreign keys off");

    let adapter = AuthAdapter::from_connection(conn).expect("initialization should succeed");
    run_migrations(adapter.source()).expect("failed to run migrations");

    let err = adapter
        .link_account(&NewAccount::new(Uuid::new_v4(), "oauth", "github", "orphan"))
        .expect_err("orphan link must fail");
    assert!(err.is_foreign_key_violation(), "unexpected error: {err}");

    let user = adapter.create_user(&NewUser::default()).unwrap();
    adapter
        .link_account(&NewAccount::new(user.id, "oauth", "github", "owned"))
        .unwrap();
    adapter.delete_user(user.id).unwrap();
    assert_eq!(count(&adapter, "Account"), 0);
}
