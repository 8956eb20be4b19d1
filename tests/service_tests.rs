//! Auth service lifecycle tests
//!
//! Exercises registration, login validation, session issuance and teardown,
//! and the password-reset token flow against an in-memory identity store.

use std::sync::Arc;

use gatehouse::auth::crypto::FAST_HASHING_ENV;
use gatehouse::auth::{AuthService, MemorySessions, SessionBackend, StoreSessions};
use gatehouse::db::{StoreProvider, UserStore};
use gatehouse::types::AppError;

async fn create_test_store() -> Arc<dyn UserStore> {
    // Minimal Argon2 cost keeps the suite fast
    std::env::set_var(FAST_HASHING_ENV, "1");

    let store = StoreProvider::Memory
        .create_store()
        .await
        .expect("Failed to create in-memory store");
    Arc::from(store)
}

/// Service with sessions persisted on the identity record.
async fn store_backed_service() -> AuthService {
    let store = create_test_store().await;
    let sessions: Arc<dyn SessionBackend> = Arc::new(StoreSessions::new(store.clone()));
    AuthService::new(store, sessions)
}

/// Service with sessions held in a process-local table.
async fn memory_backed_service() -> AuthService {
    let store = create_test_store().await;
    let sessions: Arc<dyn SessionBackend> = Arc::new(MemorySessions::new());
    AuthService::new(store, sessions)
}

// ============= Registration and Login =============

#[tokio::test]
async fn test_register_and_login() {
    let auth = store_backed_service().await;

    let user = auth
        .register("alice@example.com", "hunter2boogaloo")
        .await
        .expect("Registration should succeed");

    assert_eq!(user.email, "alice@example.com");
    // The store never sees the plaintext
    assert_ne!(user.hashed_password, "hunter2boogaloo");

    assert!(auth.valid_login("alice@example.com", "hunter2boogaloo").await);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "correct-password")
        .await
        .expect("Registration should succeed");

    assert!(!auth.valid_login("alice@example.com", "wrong-password").await);
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let auth = store_backed_service().await;

    assert!(!auth.valid_login("nobody@example.com", "any-password").await);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "first-password")
        .await
        .expect("Registration should succeed");

    let result = auth.register("alice@example.com", "second-password").await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // The original credential is untouched
    assert!(auth.valid_login("alice@example.com", "first-password").await);
    assert!(!auth.valid_login("alice@example.com", "second-password").await);
}

// ============= Session Lifecycle =============

#[tokio::test]
async fn test_session_round_trip() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let session_id = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("Known email should get a session");

    let user = auth
        .user_from_session(&session_id)
        .await
        .expect("Session should resolve");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_create_session_for_unknown_email() {
    let auth = store_backed_service().await;

    let session = auth
        .create_session("nobody@example.com")
        .await
        .expect("Lookup should succeed");

    assert!(session.is_none());
}

#[tokio::test]
async fn test_unknown_session_resolves_nothing() {
    let auth = store_backed_service().await;

    assert!(auth.user_from_session("never-issued").await.is_none());
}

#[tokio::test]
async fn test_destroy_session() {
    let auth = store_backed_service().await;

    let user = auth
        .register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let session_id = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("Known email should get a session");

    auth.destroy_session(&user.id)
        .await
        .expect("Destroy should succeed");

    assert!(auth.user_from_session(&session_id).await.is_none());
}

#[tokio::test]
async fn test_store_backend_keeps_one_session_per_user() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let first = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");
    let second = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");

    // A new login replaces the session held on the identity record
    assert!(auth.user_from_session(&first).await.is_none());
    assert!(auth.user_from_session(&second).await.is_some());
}

#[tokio::test]
async fn test_memory_backend_keeps_every_session() {
    let auth = memory_backed_service().await;

    auth.register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let first = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");
    let second = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");

    assert!(auth.user_from_session(&first).await.is_some());
    assert!(auth.user_from_session(&second).await.is_some());
}

#[tokio::test]
async fn test_destroy_session_clears_memory_backend_sessions() {
    let auth = memory_backed_service().await;

    let user = auth
        .register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let first = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");
    let second = auth
        .create_session("alice@example.com")
        .await
        .expect("Session creation should succeed")
        .expect("session");

    // Teardown removes every session the identity holds, not just one
    auth.destroy_session(&user.id)
        .await
        .expect("Destroy should succeed");

    assert!(auth.user_from_session(&first).await.is_none());
    assert!(auth.user_from_session(&second).await.is_none());
}

// ============= Password Reset =============

#[tokio::test]
async fn test_password_reset_flow() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "old-password")
        .await
        .expect("Registration should succeed");

    let token = auth
        .request_password_reset("alice@example.com")
        .await
        .expect("Reset request should succeed");
    assert!(!token.is_empty());

    auth.update_password(&token, "new-password")
        .await
        .expect("Password update should succeed");

    assert!(auth.valid_login("alice@example.com", "new-password").await);
    assert!(!auth.valid_login("alice@example.com", "old-password").await);
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "old-password")
        .await
        .expect("Registration should succeed");

    let token = auth
        .request_password_reset("alice@example.com")
        .await
        .expect("Reset request should succeed");

    auth.update_password(&token, "new-password")
        .await
        .expect("First update should succeed");

    // The token was consumed by the first update
    let result = auth.update_password(&token, "another-password").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(auth.valid_login("alice@example.com", "new-password").await);
}

#[tokio::test]
async fn test_new_reset_token_replaces_old() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "old-password")
        .await
        .expect("Registration should succeed");

    let first = auth
        .request_password_reset("alice@example.com")
        .await
        .expect("Reset request should succeed");
    let second = auth
        .request_password_reset("alice@example.com")
        .await
        .expect("Reset request should succeed");

    let result = auth.update_password(&first, "new-password").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    auth.update_password(&second, "new-password")
        .await
        .expect("Update with the live token should succeed");
}

#[tokio::test]
async fn test_reset_for_unknown_email() {
    let auth = store_backed_service().await;

    let result = auth.request_password_reset("nobody@example.com").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_with_bogus_token() {
    let auth = store_backed_service().await;

    auth.register("alice@example.com", "password")
        .await
        .expect("Registration should succeed");

    let result = auth.update_password("never-issued", "new-password").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(auth.valid_login("alice@example.com", "password").await);
}
