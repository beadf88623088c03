//! Run with a Postgres instance reachable via `DATABASE_URL`:
//! `cargo test -p account-service --test postgres_repository_tests -- --ignored`

mod common;

use account_service::domain::user::models::CreateUserParams;
use account_service::domain::user::models::UpdateUserParams;
use account_service::domain::user::ports::UserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::user::errors::StoreError;
use chrono::Utc;
use common::TestDb;

fn params(username: &str, email: &str) -> CreateUserParams {
    CreateUserParams {
        username: username.to_string(),
        hashed_password: "hash".to_string(),
        full_name: "Alice A".to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_create_and_get_user() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository
        .create_user(params("alice", "alice@example.com"))
        .await
        .unwrap();
    assert!(created.password_changed_at.is_none());

    let fetched = repository.get_user("alice").await.unwrap();
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_unique_violations_are_classified() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create_user(params("alice", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(
        repository
            .create_user(params("alice", "other@example.com"))
            .await,
        Err(StoreError::Conflict("username".to_string()))
    );
    assert_eq!(
        repository
            .create_user(params("bob", "alice@example.com"))
            .await,
        Err(StoreError::Conflict("email".to_string()))
    );
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_partial_update_keeps_absent_columns() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let created = repository
        .create_user(params("alice", "alice@example.com"))
        .await
        .unwrap();

    let updated = repository
        .update_user(UpdateUserParams {
            username: "alice".to_string(),
            full_name: Some("Alice B".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Alice B");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.hashed_password, created.hashed_password);

    let updated = repository
        .update_user(UpdateUserParams {
            username: "alice".to_string(),
            hashed_password: Some("new-hash".to_string()),
            password_changed_at: Some(Utc::now()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.hashed_password, "new-hash");
    assert!(updated.password_changed_at.is_some());
    assert_eq!(updated.full_name, "Alice B");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_update_all_fields() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let created = repository
        .create_user(params("alice", "alice@example.com"))
        .await
        .unwrap();

    let updated = repository
        .update_user(UpdateUserParams {
            username: "alice".to_string(),
            full_name: Some("Alice B".to_string()),
            hashed_password: Some("new-hash".to_string()),
            password_changed_at: Some(Utc::now()),
            email: Some("alice.b@example.com".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(updated.full_name, "Alice B");
    assert_eq!(updated.hashed_password, "new-hash");
    assert!(updated.password_changed_at.is_some());
    assert_eq!(updated.email, "alice.b@example.com");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_missing_user() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    assert_eq!(
        repository.get_user("ghost").await,
        Err(StoreError::NotFound("ghost".to_string()))
    );
    assert_eq!(
        repository
            .update_user(UpdateUserParams {
                username: "ghost".to_string(),
                full_name: Some("Ghost G".to_string()),
                ..Default::default()
            })
            .await,
        Err(StoreError::NotFound("ghost".to_string()))
    );
}
