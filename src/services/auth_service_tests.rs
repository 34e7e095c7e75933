// src/services/auth_service_tests.rs
//
// Session lifecycle scenarios against a scripted backend and a real
// on-disk session store.
//
// INVARIANTS TESTED:
// - All three tolerated login shapes normalize to the same session form
// - Login failures leave the session anonymous and nothing persisted
// - Logout clears local state even when the remote call fails
// - Hydration restores a persisted session and purges a corrupt one

use serde_json::json;
use std::sync::Arc;

use crate::db::{create_pool_at, get_connection, initialize_database};
use crate::error::AppError;
use crate::events::create_event_bus;
use crate::repositories::{
    session_keys, SessionRepository, SqliteSessionRepository, StoreNamespace,
};
use crate::services::test_support::FakeBackend;
use crate::services::{AuthService, SignupRequest};

struct Harness {
    _dir: tempfile::TempDir,
    backend: Arc<FakeBackend>,
    repo: Arc<SqliteSessionRepository>,
    service: AuthService,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(create_pool_at(&dir.path().join("test.db")).unwrap());
    initialize_database(&get_connection(&pool).unwrap()).unwrap();

    let backend = Arc::new(FakeBackend::new());
    let repo = Arc::new(SqliteSessionRepository::new(pool));
    let service = AuthService::new(backend.clone(), repo.clone(), create_event_bus());

    Harness {
        _dir: dir,
        backend,
        repo,
        service,
    }
}

fn signup_request() -> SignupRequest {
    SignupRequest {
        username: "bob".into(),
        email: "bob@shop.test".into(),
        password: "hunter2!".into(),
        confirm_password: "hunter2!".into(),
    }
}

#[tokio::test]
async fn test_login_token_with_user_shape() {
    let h = harness();
    h.backend.set_login(json!({
        "token": "t1",
        "user": {"id": "u1", "email": "a@b.com"}
    }));

    let session = h.service.login("a@b.com", "pw").await.unwrap();

    assert!(session.is_authenticated);
    assert_eq!(session.token.as_deref(), Some("t1"));
    assert_eq!(session.user.unwrap().id.unwrap().as_str(), "u1");

    // Persisted and installed as bearer.
    assert_eq!(
        h.repo
            .get(StoreNamespace::User, session_keys::TOKEN)
            .unwrap()
            .as_deref(),
        Some("t1")
    );
    assert_eq!(h.backend.bearer().as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_login_access_token_shape() {
    let h = harness();
    h.backend.set_login(json!({
        "accessToken": "t1",
        "user": {"id": "u1", "email": "a@b.com"}
    }));

    let session = h.service.login("a@b.com", "pw").await.unwrap();
    assert_eq!(session.token.as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_login_flat_shape_normalizes_user() {
    let h = harness();
    h.backend.set_login(json!({
        "token": "t2",
        "userId": 42,
        "username": "bob"
    }));

    let session = h.service.login("bob", "pw").await.unwrap();

    assert_eq!(session.token.as_deref(), Some("t2"));
    let user = session.user.unwrap();
    assert_eq!(user.id.unwrap().as_str(), "42");
    assert_eq!(user.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_login_refresh_token_is_persisted() {
    let h = harness();
    h.backend.set_login(json!({
        "token": "t1",
        "refreshToken": "r1",
        "user": {"id": "u1"}
    }));

    h.service.login("a@b.com", "pw").await.unwrap();

    assert_eq!(
        h.repo
            .get(StoreNamespace::User, session_keys::REFRESH_TOKEN)
            .unwrap()
            .as_deref(),
        Some("r1")
    );
}

#[tokio::test]
async fn test_login_unknown_shape_fails_loudly() {
    let h = harness();
    h.backend.set_login(json!({"status": "ok"}));

    let err = h.service.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidResponseFormat(_)));
    assert!(h.service.current_session().is_anonymous());
    assert!(h
        .repo
        .get(StoreNamespace::User, session_keys::TOKEN)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let h = harness();
    h.backend.set_login(json!({"user": {"id": "u1"}}));

    let err = h.service.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, AppError::MissingToken));
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let h = harness();
    // No scripted login response: the fake rejects with 401.

    let err = h.service.login("a@b.com", "wrong").await.unwrap_err();

    match err {
        AppError::ServerRejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(h.service.current_session().is_anonymous());
}

#[tokio::test]
async fn test_logout_clears_locally_even_when_remote_fails() {
    let h = harness();
    h.backend.set_login(json!({"token": "t1", "user": {"id": "u1"}}));
    h.service.login("a@b.com", "pw").await.unwrap();

    h.backend.fail_logout();
    let session = h.service.logout().await;

    assert!(session.is_anonymous());
    assert!(h.service.current_session().is_anonymous());
    assert!(h
        .repo
        .get(StoreNamespace::User, session_keys::TOKEN)
        .unwrap()
        .is_none());
    assert!(h.backend.bearer().is_none());
}

#[tokio::test]
async fn test_logout_invokes_remote_once_when_authenticated() {
    let h = harness();
    h.backend.set_login(json!({"token": "t1", "user": {"id": "u1"}}));
    h.service.login("a@b.com", "pw").await.unwrap();

    h.service.logout().await;
    assert_eq!(h.backend.logout_calls(), 1);

    // Already anonymous: no second remote call.
    h.service.logout().await;
    assert_eq!(h.backend.logout_calls(), 1);
}

#[tokio::test]
async fn test_signup_password_mismatch_is_local_error() {
    let h = harness();
    let request = SignupRequest {
        confirm_password: "different".into(),
        ..signup_request()
    };

    let err = h.service.signup(request).await.unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));
}

#[tokio::test]
async fn test_signup_does_not_establish_session() {
    let h = harness();
    h.backend.set_signup(json!({"message": "Account created"}));

    let ack = h.service.signup(signup_request()).await.unwrap();

    assert_eq!(ack.message.as_deref(), Some("Account created"));
    assert!(h.service.current_session().is_anonymous());
}

#[tokio::test]
async fn test_hydrate_restores_persisted_session() {
    let h = harness();
    h.backend.set_login(json!({"token": "t1", "user": {"id": "u1"}}));
    h.service.login("a@b.com", "pw").await.unwrap();

    // Fresh service over the same store, as after an app restart.
    let restarted = AuthService::new(h.backend.clone(), h.repo.clone(), create_event_bus());
    let session = restarted.hydrate().unwrap();

    assert!(session.is_authenticated);
    assert_eq!(session.token.as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_hydrate_purges_corrupt_user_record() {
    let h = harness();
    h.repo
        .put(StoreNamespace::User, session_keys::TOKEN, "t1")
        .unwrap();
    h.repo
        .put(StoreNamespace::User, session_keys::USER, "{not json")
        .unwrap();

    let session = h.service.hydrate().unwrap();

    assert!(session.is_anonymous());
    assert!(h
        .repo
        .get(StoreNamespace::User, session_keys::TOKEN)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_hydrate_purges_incomplete_session() {
    let h = harness();
    h.repo
        .put(StoreNamespace::User, session_keys::TOKEN, "t1")
        .unwrap();

    let session = h.service.hydrate().unwrap();

    assert!(session.is_anonymous());
    assert!(h
        .repo
        .get(StoreNamespace::User, session_keys::TOKEN)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_purge_auth_is_local_only() {
    let h = harness();
    h.backend.set_login(json!({"token": "t1", "user": {"id": "u1"}}));
    h.service.login("a@b.com", "pw").await.unwrap();

    h.service.purge_auth().unwrap();

    assert!(h.service.current_session().is_anonymous());
    assert_eq!(h.backend.logout_calls(), 0);
}
