//! Account registration and login against a real database.
//!
//! Requires `STOREFRONT_DATABASE_URL`. Run with:
//! `cargo test -p electroshop-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use electroshop_integration_tests::{test_pool, unique, users_named};
use electroshop_storefront::services::{AuthService, Registration};

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_register_same_username_twice() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = unique("ann");

    let first = auth.register(&username, "secret").await.unwrap();
    let second = auth.register(&username, "other").await.unwrap();

    assert!(first.is_created());
    assert!(matches!(second, Registration::UsernameTaken));
    assert_eq!(users_named(&pool, &username).await, 1);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_concurrent_registrations_create_one_account() {
    let pool = test_pool().await;
    let username = unique("race");
    let first = AuthService::new(&pool);
    let second = AuthService::new(&pool);

    let (a, b) = tokio::join!(
        first.register(&username, "one"),
        second.register(&username, "two"),
    );

    let created = [a.unwrap(), b.unwrap()]
        .iter()
        .filter(|r| r.is_created())
        .count();
    assert_eq!(created, 1);
    assert_eq!(users_named(&pool, &username).await, 1);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_authenticate() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = unique("bob");

    auth.register(&format!("  {username} "), " hunter2 ")
        .await
        .unwrap();

    let user = auth.authenticate(&username, "hunter2").await.unwrap().unwrap();
    assert_eq!(user.username.as_str(), username);

    assert!(auth.authenticate(&username, "wrong").await.unwrap().is_none());
    assert!(
        auth.authenticate(&unique("nobody"), "hunter2")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_password_is_stored_hashed() {
    let pool = test_pool().await;
    let username = unique("carol");
    AuthService::new(&pool)
        .register(&username, "plaintext-secret")
        .await
        .unwrap();

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM app_user WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("plaintext-secret"));
}
