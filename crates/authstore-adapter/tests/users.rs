mod common;

use authstore_types::{NewUser, UserPatch};
use common::{adapter, at, create_user, new_user};
use uuid::Uuid;

#[test]
fn create_then_get_returns_equal_record() {
    let adapter = adapter();
    let created = adapter
        .create_user(&NewUser {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            email_verified: Some(at(2024, 3, 1)),
            image: Some("https://example.com/ada.png".to_string()),
            ..NewUser::default()
        })
        .expect("create_user should succeed");

    let fetched = adapter.get_user(created.id).expect("get_user should succeed");
    assert_eq!(fetched, Some(created.clone()));

    let by_email = adapter
        .get_user_by_email("ada@example.com")
        .expect("get_user_by_email should succeed");
    assert_eq!(by_email, Some(created));
}

#[test]
fn create_user_keeps_caller_supplied_id() {
    let adapter = adapter();
    let id = Uuid::new_v4();
    let created = adapter
        .create_user(&NewUser {
            id: Some(id),
            ..new_user("id@example.com")
        })
        .expect("create_user should succeed");
    assert_eq!(created.id, id);
}

#[test]
fn generated_ids_are_distinct() {
    let adapter = adapter();
    let a = create_user(&adapter, "a@example.com");
    let b = create_user(&adapter, "b@example.com");
    assert_ne!(a.id, b.id);
}

#[test]
fn missing_user_is_absent() {
    let adapter = adapter();
    assert_eq!(adapter.get_user(Uuid::new_v4()).unwrap(), None);
    assert_eq!(adapter.get_user_by_email("nobody@example.com").unwrap(), None);
}

#[test]
fn email_lookup_is_case_sensitive() {
    let adapter = adapter();
    create_user(&adapter, "Ada@Example.com");
    assert_eq!(adapter.get_user_by_email("ada@example.com").unwrap(), None);
}

#[test]
fn duplicate_email_is_a_unique_violation() {
    let adapter = adapter();
    create_user(&adapter, "dup@example.com");

    let err = adapter
        .create_user(&new_user("dup@example.com"))
        .expect_err("second user with the same email must fail");
    assert!(err.is_unique_violation(), "unexpected error: {err}");
}

#[test]
fn users_without_email_may_coexist() {
    let adapter = adapter();
    adapter.create_user(&NewUser::default()).unwrap();
    adapter.create_user(&NewUser::default()).unwrap();
    assert_eq!(common::count(&adapter, "User"), 2);
}

#[test]
fn update_touches_only_patched_fields() {
    let adapter = adapter();
    let user = create_user(&adapter, "patch@example.com");

    let updated = adapter
        .update_user(
            user.id,
            &UserPatch {
                email_verified: Some(Some(at(2024, 5, 6))),
                image: Some(Some("https://example.com/new.png".to_string())),
                ..UserPatch::default()
            },
        )
        .expect("update_user should succeed")
        .expect("user should exist");

    assert_eq!(updated.name, user.name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.email_verified, Some(at(2024, 5, 6)));
    assert_eq!(updated.image.as_deref(), Some("https://example.com/new.png"));

    let fetched = adapter.get_user(user.id).unwrap();
    assert_eq!(fetched, Some(updated));
}

#[test]
fn update_can_clear_a_column() {
    let adapter = adapter();
    let user = create_user(&adapter, "clear@example.com");

    let updated = adapter
        .update_user(
            user.id,
            &UserPatch {
                name: Some(None),
                ..UserPatch::default()
            },
        )
        .unwrap()
        .expect("user should exist");
    assert_eq!(updated.name, None);
    assert_eq!(updated.email, user.email);
}

#[test]
fn empty_patch_returns_current_row() {
    let adapter = adapter();
    let user = create_user(&adapter, "noop@example.com");
    let unchanged = adapter.update_user(user.id, &UserPatch::default()).unwrap();
    assert_eq!(unchanged, Some(user));
}

#[test]
fn update_of_missing_user_is_absent() {
    let adapter = adapter();
    let patch = UserPatch {
        name: Some(Some("ghost".to_string())),
        ..UserPatch::default()
    };
    assert_eq!(adapter.update_user(Uuid::new_v4(), &patch).unwrap(), None);
}

#[test]
fn update_to_taken_email_is_a_unique_violation() {
    let adapter = adapter();
    create_user(&adapter, "taken@example.com");
    let other = create_user(&adapter, "other@example.com");

    let err = adapter
        .update_user(
            other.id,
            &UserPatch {
                email: Some(Some("taken@example.com".to_string())),
                ..UserPatch::default()
            },
        )
        .expect_err("email clash must fail");
    assert!(err.is_unique_violation());
}

#[test]
fn delete_returns_prior_row_and_removes_it() {
    let adapter = adapter();
    let user = create_user(&adapter, "gone@example.com");

    let deleted = adapter.delete_user(user.id).unwrap();
    assert_eq!(deleted, Some(user.clone()));
    assert_eq!(adapter.get_user(user.id).unwrap(), None);
    assert_eq!(adapter.delete_user(user.id).unwrap(), None);
}
