//! Mock backend tests for the HTTP session layer.
//!
//! These tests use wiremock to simulate the task-management REST API and
//! drive a real [`SessionStore`] through [`HttpAuthBackend`].

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdesk_core::error::{AuthError, Error, RegistrationError};
use taskdesk_core::{
    ApiUrl, AuthBackend, Credentials, MemoryTokenStore, RegistrationInput, ResolutionState,
    SessionStore, SessionToken, TokenStore,
};
use taskdesk_http::HttpAuthBackend;

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(server.uri()).unwrap()
}

fn backend(server: &MockServer) -> HttpAuthBackend {
    HttpAuthBackend::new(mock_api_url(server)).unwrap()
}

fn profile_body() -> serde_json::Value {
    json!({
        "id": "65f1c0ffee",
        "fullName": "Alice Admin",
        "email": "a@b.com",
        "role": "ROLE_ADMIN",
        "mobile": "5550100",
        "completedTasks": [3, 5]
    })
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_sign_in_sends_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": "abc.def.ghi",
            "message": "Login success",
            "status": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = backend(&server)
        .sign_in(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap();

    assert_eq!(payload.token().unwrap().as_str(), "abc.def.ghi");
}

#[tokio::test]
async fn test_sign_in_plain_text_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw.token.value"))
        .mount(&server)
        .await;

    let payload = backend(&server)
        .sign_in(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap();

    assert_eq!(payload.token().unwrap().as_str(), "raw.token.value");
}

#[tokio::test]
async fn test_sign_in_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let err = backend(&server)
        .sign_in(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::Rejected { status: 401, .. })
    ));
    assert_eq!(err.server_message(), Some("Invalid username or password"));
}

#[tokio::test]
async fn test_sign_in_unreachable_backend() {
    // Nothing listens on port 9 (discard) on loopback.
    let backend = HttpAuthBackend::new(ApiUrl::new("http://127.0.0.1:9").unwrap()).unwrap();

    let err = backend
        .sign_in(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_fetch_profile_attaches_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .and(header("authorization", "Bearer abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let token = SessionToken::new("abc.def.ghi").unwrap();
    let profile = backend(&server).fetch_profile(&token).await.unwrap();

    assert!(profile.is_admin());
    assert_eq!(serde_json::to_value(&profile).unwrap(), profile_body());
}

#[tokio::test]
async fn test_fetch_profile_rejected_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let token = SessionToken::new("expired").unwrap();
    let err = backend(&server).fetch_profile(&token).await.unwrap_err();

    assert!(matches!(err, Error::Protocol(ref e) if e.is_auth_error()));
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_sign_up_returns_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "pw",
            "mobile": "5550100",
            "role": "ROLE_CUSTOMER"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "jwt": "issued",
            "message": "Register success",
            "status": true
        })))
        .mount(&server)
        .await;

    let input = RegistrationInput::new("Ada Lovelace", "ada@example.com", "pw", "5550100");
    let payload = backend(&server).sign_up(&input).await.unwrap();

    assert_eq!(payload["message"], "Register success");
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Email is already used with another account"
        })))
        .mount(&server)
        .await;

    let input = RegistrationInput::new("Ada", "ada@example.com", "pw", "5550100");
    let err = backend(&server).sign_up(&input).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Registration(RegistrationError::Rejected { status: 400, .. })
    ));
    assert_eq!(
        err.server_message(),
        Some("Email is already used with another account")
    );
}

#[tokio::test]
async fn test_sign_up_status_false_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": null,
            "message": "User registration failed due to a temporary issue.",
            "status": false
        })))
        .mount(&server)
        .await;

    let input = RegistrationInput::new("Ada", "ada@example.com", "pw", "5550100");
    let err = backend(&server).sign_up(&input).await.unwrap_err();

    assert_eq!(
        err.server_message(),
        Some("User registration failed due to a temporary issue.")
    );
}

// ============================================================================
// Session store over HTTP
// ============================================================================

#[tokio::test]
async fn test_login_then_profile_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc.def.ghi"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .and(header("authorization", "Bearer abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let store = SessionStore::new(backend(&server), tokens.clone());
    store.initialize().await;

    let profile = store
        .login(Credentials::new("a@b.com", "x"))
        .await
        .unwrap();

    assert!(store.is_authenticated());
    assert_eq!(profile.role_name(), Some("ROLE_ADMIN"));
    assert_eq!(
        tokens.load().unwrap().map(|t| t.as_str().to_string()),
        Some("abc.def.ghi".to_string())
    );
}

#[tokio::test]
async fn test_initialize_with_rejected_token_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Invalid token"})))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token(
        SessionToken::new("stale").unwrap(),
    ));
    let store = SessionStore::new(backend(&server), tokens.clone());

    store.initialize().await;

    assert_eq!(store.resolution_state(), ResolutionState::Resolved);
    assert!(!store.is_authenticated());
    assert!(tokens.load().unwrap().is_none());
}

#[tokio::test]
async fn test_initialize_without_token_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = SessionStore::new(backend(&server), Arc::new(MemoryTokenStore::new()));
    store.initialize().await;

    assert_eq!(store.resolution_state(), ResolutionState::Resolved);
    assert!(!store.is_authenticated());
}
