//! Auth session facade integration tests
//!
//! Login, logout and session inspection against a mock backend, including
//! the interactions with the session store and the refresh-retry pipeline.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use folio_client::{ApiClient, AuthSession, ClientConfig, MemorySessionStore, SessionStore};
use folio_domain::Role;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(role: &str) -> serde_json::Value {
    json!({
        "id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "role": role,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn auth_envelope(token: &str, refresh_token: &str, role: &str) -> serde_json::Value {
    json!({"data": {"token": token, "refreshToken": refresh_token, "user": user_json(role)}})
}

fn setup(server: &MockServer) -> (AuthSession, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let config = ClientConfig::new(server.uri());
    let client =
        Arc::new(ApiClient::new(&config, store.clone() as Arc<dyn SessionStore>).unwrap());
    (AuthSession::new(client), store)
}

#[tokio::test]
async fn login_persists_session_and_returns_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "Secret123!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_envelope("t1", "r1", "admin")))
        .expect(1)
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    let profile = session.login("ada@example.com", "Secret123!").await.unwrap();

    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.role, Role::Admin);

    let stored = store.snapshot().await;
    assert_eq!(stored.access_token.as_deref(), Some("t1"));
    assert_eq!(stored.refresh_token.as_deref(), Some("r1"));
    assert!(stored.user.is_some());

    assert!(session.is_authenticated().await);
    assert!(session.is_admin().await);
}

/// Bad credentials come back as a plain 401 with the server's message, not
/// as a session-expired signal, and the refresh endpoint is never consulted.
#[tokio::test]
async fn login_failure_is_plain_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    let err = session.login("ada@example.com", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!err.is_session_expired());
    assert_eq!(err.message(), "Invalid credentials (status 401)");
    assert!(!store.snapshot().await.is_authenticated());
}

#[tokio::test]
async fn logout_notifies_backend_and_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    store.set("t1", "r1", "{}").await;

    session.logout().await;

    assert_eq!(store.snapshot().await, folio_client::Session::default());
    assert!(!session.is_authenticated().await);
}

/// Logging out without a session is a no-op, repeatable, and makes no
/// network calls.
#[tokio::test]
async fn logout_is_idempotent_when_logged_out() {
    let server = MockServer::start().await;
    let (session, store) = setup(&server);

    session.logout().await;
    session.logout().await;

    assert_eq!(store.snapshot().await, folio_client::Session::default());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_session_even_when_remote_call_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    store.set("t1", "r1", "{}").await;

    session.logout().await;

    assert_eq!(store.snapshot().await, folio_client::Session::default());
}

#[tokio::test]
async fn current_user_reads_cached_profile() {
    let server = MockServer::start().await;
    let (session, store) = setup(&server);
    store.set("t1", "r1", &user_json("user").to_string()).await;

    let user = session.current_user().await.unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, Role::User);
    assert!(!session.is_admin().await);
}

#[tokio::test]
async fn unreadable_cached_profile_reads_as_absent() {
    let server = MockServer::start().await;
    let (session, store) = setup(&server);
    store.set("t1", "r1", "not json").await;

    assert!(session.current_user().await.is_none());
    assert!(!session.is_admin().await);
    // The token itself is untouched.
    assert!(session.is_authenticated().await);
}

#[tokio::test]
async fn check_auth_is_false_without_a_session() {
    let server = MockServer::start().await;
    let (session, _store) = setup(&server);

    assert!(!session.check_auth().await);
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// The liveness probe goes through the full pipeline: an expired access
/// token is refreshed transparently and the probe still reports valid.
#[tokio::test]
async fn check_auth_survives_an_expired_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": user_json("user")})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(auth_envelope("fresh", "r2", "user")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    store.set("stale", "r1", "{}").await;

    assert!(session.check_auth().await);
    assert_eq!(store.snapshot().await.access_token.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn check_auth_is_false_when_session_cannot_be_recovered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (session, store) = setup(&server);
    store.set("stale", "r1", "{}").await;

    assert!(!session.check_auth().await);
    assert_eq!(store.snapshot().await, folio_client::Session::default());
}
