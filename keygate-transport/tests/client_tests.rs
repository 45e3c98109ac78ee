use keygate_transport::{HttpTransport, TransportConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> HttpTransport {
    HttpTransport::with_defaults().unwrap()
}

// ── Config ──────────────────────────────────────────────────────

#[test]
fn config_default_timeout_is_30s() {
    let cfg = TransportConfig::default();
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn config_default_user_agent_names_product() {
    let cfg = TransportConfig::default();
    assert!(cfg.user_agent.starts_with("keygate/"));
}

#[test]
fn transport_builds_from_custom_config() {
    let cfg = TransportConfig {
        timeout_secs: 5,
        user_agent: "test-agent/0.0".to_string(),
    };
    assert!(HttpTransport::new(&cfg).is_ok());
}

// ── POST ────────────────────────────────────────────────────────

#[tokio::test]
async fn post_json_sends_body_and_returns_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(serde_json::json!({"hello": "world"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let response = transport()
        .post_json(
            &format!("{}/echo", server.uri()),
            &serde_json::json!({"hello": "world"}),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.body, r#"{"ok":true}"#);
}

#[tokio::test]
async fn post_json_non_2xx_is_transport_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/denied"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"no"}"#))
        .mount(&server)
        .await;

    let response = transport()
        .post_json(&format!("{}/denied", server.uri()), &serde_json::json!({}))
        .await
        .unwrap();

    // Interpreting the status is the caller's protocol concern
    assert_eq!(response.status, 403);
    assert!(!response.is_success());
    assert_eq!(response.body, r#"{"error":"no"}"#);
}

#[tokio::test]
async fn post_json_connection_refused_is_error_not_panic() {
    // Reserved port with nothing listening
    let result = transport()
        .post_json("http://127.0.0.1:1/unreachable", &serde_json::json!({}))
        .await;

    let err = result.unwrap_err();
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn post_json_honors_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let cfg = TransportConfig {
        timeout_secs: 1,
        user_agent: "test-agent/0.0".to_string(),
    };
    let transport = HttpTransport::new(&cfg).unwrap();

    let err = transport
        .post_json(&format!("{}/slow", server.uri()), &serde_json::json!({}))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

// ── GET ─────────────────────────────────────────────────────────

#[tokio::test]
async fn get_returns_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"up":true}"#))
        .mount(&server)
        .await;

    let response = transport()
        .get(&format!("{}/status", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"up":true}"#);
}
