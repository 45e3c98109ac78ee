//! Shared test helpers for session tests.

#![allow(dead_code)]

use keygate_session::{SessionConfig, SessionManager};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a manager pointed at a mock server.
pub fn manager_for(server: &MockServer) -> SessionManager {
    SessionManager::new(test_config(&server.uri())).unwrap()
}

/// Builds a config pointed at the given base URL with a short timeout.
pub fn test_config(base_url: &str) -> SessionConfig {
    SessionConfig {
        base_url: base_url.to_string(),
        timeout_secs: 2,
        ..Default::default()
    }
}

/// Mounts a /validate mock issuing the given token.
pub async fn mount_validate_success(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "session_token": token,
        })))
        .mount(server)
        .await;
}

/// Mounts a /check-session mock with the given verdict.
pub async fn mount_check_session(server: &MockServer, valid: bool) {
    Mock::given(method("POST"))
        .and(path("/check-session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "valid": valid })),
        )
        .mount(server)
        .await;
}

/// Authenticates the manager through a successful validate exchange.
pub async fn login(server: &MockServer, manager: &SessionManager, username: &str) {
    mount_validate_success(server, "test-token").await;
    let outcome = manager.validate_key(username, "test-key").await.unwrap();
    assert!(outcome.success);
    assert!(manager.is_authenticated().await);
}
