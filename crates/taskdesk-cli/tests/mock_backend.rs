//! CLI tests against a mock backend.
//!
//! Each test starts a wiremock server, points the built binary at it, and
//! keeps the token in a temporary file.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_failure, run_cli_success, run_cli_with_env};

const TOKEN: &str = "abc.def.ghi";

fn token_file(dir: &TempDir) -> PathBuf {
    dir.path().join("token.json")
}

fn write_token(path: &Path, token: &str) {
    fs::write(path, json!({ "authToken": token }).to_string()).unwrap();
}

async fn mount_signin(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwt": TOKEN,
            "message": "Login success",
            "status": true
        })))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "fullName": "Alice Example",
            "email": "alice@example.com",
            "role": role
        })))
        .mount(server)
        .await;
}

// ============================================================================
// login / logout
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_token_and_lands_on_dashboard() {
    let server = MockServer::start().await;
    mount_signin(&server).await;
    mount_profile(&server, "ROLE_CUSTOMER").await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);

    let stdout = run_cli_success(
        &["login", "--email", "alice@example.com", "--password", "pw"],
        &tokens,
        &server.uri(),
    );

    assert!(stdout.contains("Signed in"), "stdout: {}", stdout);
    assert!(stdout.contains("/dashboard"), "stdout: {}", stdout);
    assert!(!stdout.contains("admin"), "stdout: {}", stdout);

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&tokens).unwrap()).unwrap();
    assert_eq!(stored["authToken"], TOKEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_returns_to_requested_route() {
    let server = MockServer::start().await;
    mount_signin(&server).await;
    mount_profile(&server, "ROLE_CUSTOMER").await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);

    let stdout = run_cli_success(
        &[
            "login",
            "--email",
            "alice@example.com",
            "--password",
            "pw",
            "--from",
            "/submissions",
        ],
        &tokens,
        &server.uri(),
    );

    assert!(stdout.contains("Location: /submissions"), "stdout: {}", stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);

    let stderr = run_cli_failure(
        &["login", "--email", "alice@example.com", "--password", "nope"],
        &tokens,
        &server.uri(),
    );

    assert!(stderr.contains("Invalid username or password"), "stderr: {}", stderr);
    assert!(!tokens.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_when_already_signed_in() {
    let server = MockServer::start().await;
    mount_profile(&server, "ROLE_CUSTOMER").await;
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, TOKEN);

    let stdout = run_cli_success(
        &["login", "--email", "alice@example.com", "--password", "pw"],
        &tokens,
        &server.uri(),
    );

    assert!(stdout.contains("Location: /dashboard"), "stdout: {}", stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_removes_token() {
    let server = MockServer::start().await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, TOKEN);

    run_cli_success(&["logout"], &tokens, &server.uri());
    assert!(!tokens.exists());

    // Second logout is a no-op.
    run_cli_success(&["logout"], &tokens, &server.uri());
}

// ============================================================================
// whoami / open
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_reports_role_from_profile() {
    let server = MockServer::start().await;
    mount_profile(&server, "ROLE_ADMIN").await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, TOKEN);

    let stdout = run_cli_success(&["whoami"], &tokens, &server.uri());

    assert!(stdout.contains("Alice Example"), "stdout: {}", stdout);
    assert!(stdout.contains("alice@example.com"), "stdout: {}", stdout);
    assert!(stdout.contains("Administrator"), "stdout: {}", stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_json_is_server_payload() {
    let server = MockServer::start().await;
    mount_profile(&server, "ROLE_CUSTOMER").await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, TOKEN);

    let stdout = run_cli_success(&["whoami", "--json"], &tokens, &server.uri());
    let profile: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(
        profile,
        json!({
            "id": 7,
            "fullName": "Alice Example",
            "email": "alice@example.com",
            "role": "ROLE_CUSTOMER"
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_without_session_fails() {
    let server = MockServer::start().await;

    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(&["whoami"], &token_file(&dir), &server.uri());

    assert!(stderr.contains("Not signed in"), "stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stale_token_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, "expired");

    let output = run_cli_with_env(&["whoami"], &tokens, &server.uri());

    assert!(!output.status.success());
    assert!(!tokens.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_protected_route_redirects_to_login() {
    let server = MockServer::start().await;

    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["open", "/submissions"], &token_file(&dir), &server.uri());

    assert!(stdout.contains("Location: /login"), "stdout: {}", stdout);
    assert!(stdout.contains("From: /submissions"), "stdout: {}", stdout);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_dashboard_as_admin_shows_admin_panel() {
    let server = MockServer::start().await;
    mount_profile(&server, "ROLE_ADMIN").await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);
    write_token(&tokens, TOKEN);

    let stdout = run_cli_success(&["open", "/"], &tokens, &server.uri());

    assert!(stdout.contains("Location: /dashboard"), "stdout: {}", stdout);
    assert!(stdout.contains("admin"), "stdout: {}", stdout);
}

// ============================================================================
// register
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_register_lands_on_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "jwt": "issued",
            "message": "Register success",
            "status": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let tokens = token_file(&dir);

    let stdout = run_cli_success(
        &[
            "register",
            "--full-name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
            "--mobile",
            "5550100",
        ],
        &tokens,
        &server.uri(),
    );

    assert!(stdout.contains("Location: /login"), "stdout: {}", stdout);
    assert!(stdout.contains("Registration successful"), "stdout: {}", stdout);
    assert!(!tokens.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Email is already used with another account"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let stderr = run_cli_failure(
        &[
            "register",
            "--full-name",
            "Ada",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
            "--mobile",
            "5550100",
        ],
        &token_file(&dir),
        &server.uri(),
    );

    assert!(
        stderr.contains("Email is already used with another account"),
        "stderr: {}",
        stderr
    );
}
