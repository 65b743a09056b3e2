mod common;

use chrono::{Timelike, Utc};
use common::{datetime, new_user, test_pool};
use newsroom::{
    db_helpers::{
        delete_user, get_user_by_email, get_user_by_id, insert_favorite, insert_user,
        list_users, update_user,
    },
    parse_timestamp, IntegrityViolation, NewFavorite, SerializeError, StoreError, ToRecord,
};

#[tokio::test]
async fn duplicate_email_is_an_integrity_error() {
    let pool = test_pool().await;
    insert_user(&pool, &new_user("ada@example.com")).await.unwrap();

    let error = insert_user(&pool, &new_user("ada@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        error.integrity(),
        Some(&IntegrityViolation::Unique("users.email".to_string()))
    );
    assert_eq!(list_users(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn distinct_emails_both_succeed_with_increasing_ids() {
    let pool = test_pool().await;
    let first = insert_user(&pool, &new_user("one@example.com")).await.unwrap();
    let second = insert_user(&pool, &new_user("two@example.com")).await.unwrap();
    assert!(second.id > first.id);

    let found = get_user_by_email(&pool, "two@example.com").await.unwrap();
    assert_eq!(found, Some(second));
}

#[tokio::test]
async fn store_assigns_created_at_when_unset() {
    let pool = test_pool().await;
    let before = Utc::now().naive_utc() - chrono::Duration::seconds(1);
    let user = insert_user(&pool, &new_user("now@example.com")).await.unwrap();
    let created_at = user.created_at.expect("store default should apply");
    assert!(created_at >= before);
    assert!(created_at <= Utc::now().naive_utc() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn serialized_created_at_round_trips() {
    let pool = test_pool().await;
    let mut request = new_user("round@example.com");
    request.created_at = Some(datetime(2023, 6, 30, 17, 45, 12));
    let user = insert_user(&pool, &request).await.unwrap();
    let stored = get_user_by_id(&pool, user.id).await.unwrap().unwrap();

    let record = stored.record().unwrap();
    assert_eq!(record.created_at, "2023-06-30T17:45:12");
    assert_eq!(parse_timestamp(&record.created_at).ok(), stored.created_at);

    let defaulted = insert_user(&pool, &new_user("default@example.com"))
        .await
        .unwrap();
    let record = defaulted.record().unwrap();
    assert_eq!(parse_timestamp(&record.created_at).ok(), defaulted.created_at);
}

#[tokio::test]
async fn record_omits_password() {
    let pool = test_pool().await;
    let user = insert_user(&pool, &new_user("secret@example.com"))
        .await
        .unwrap();
    let record = user.to_record().unwrap();
    assert_eq!(record.len(), 5);
    assert!(!record.contains_key("password"));
    assert_eq!(record["email"], "secret@example.com");
}

#[tokio::test]
async fn full_row_update_replaces_every_column() {
    let pool = test_pool().await;
    let mut user = insert_user(&pool, &new_user("old@example.com")).await.unwrap();
    user.first_name = "Grace".to_string();
    user.last_name = "Hopper".to_string();
    user.email = "new@example.com".to_string();

    let updated = update_user(&pool, &user).await.unwrap();
    assert_eq!(updated, user);
    assert!(get_user_by_email(&pool, "old@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn cleared_created_at_is_a_serialization_error() {
    let pool = test_pool().await;
    let mut user = insert_user(&pool, &new_user("null@example.com")).await.unwrap();
    user.created_at = None;
    let stored = update_user(&pool, &user).await.unwrap();

    let error = stored.to_record().unwrap_err();
    assert!(matches!(
        error,
        SerializeError::MissingField {
            entity: "user",
            field: "created_at"
        }
    ));
}

#[tokio::test]
async fn update_and_delete_of_missing_user_are_not_found() {
    let pool = test_pool().await;
    let mut user = insert_user(&pool, &new_user("gone@example.com")).await.unwrap();
    delete_user(&pool, user.id).await.unwrap();
    assert!(get_user_by_id(&pool, user.id).await.unwrap().is_none());

    user.first_name = "Ghost".to_string();
    assert!(matches!(
        update_user(&pool, &user).await,
        Err(StoreError::NotFound { entity: "user", .. })
    ));
    assert!(matches!(
        delete_user(&pool, user.id).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn deleting_a_referenced_user_does_not_cascade() {
    let pool = test_pool().await;
    let user = insert_user(&pool, &new_user("fan@example.com")).await.unwrap();
    insert_favorite(
        &pool,
        &NewFavorite {
            user_id: Some(user.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let error = delete_user(&pool, user.id).await.unwrap_err();
    assert_eq!(error.integrity(), Some(&IntegrityViolation::ForeignKey));
    assert!(get_user_by_id(&pool, user.id).await.unwrap().is_some());
}

#[tokio::test]
async fn stored_timestamps_serialize_with_microsecond_fraction() {
    let pool = test_pool().await;
    let mut request = new_user("millis@example.com");
    request.created_at = datetime(2024, 3, 9, 8, 5, 3).with_nanosecond(250_000_000);
    let user = insert_user(&pool, &request).await.unwrap();
    assert_eq!(
        user.record().unwrap().created_at,
        "2024-03-09T08:05:03.250000"
    );

    let defaulted = insert_user(&pool, &new_user("default-fraction@example.com"))
        .await
        .unwrap();
    let created_at = defaulted.record().unwrap().created_at;
    let (whole, fraction) = created_at
        .split_once('.')
        .unwrap_or((created_at.as_str(), ""));
    assert_eq!(whole.len(), "2024-03-09T08:05:03".len());
    if defaulted.created_at.unwrap().nanosecond() != 0 {
        assert_eq!(fraction.len(), 6);
        assert!(fraction.ends_with("000"));
    }
}
