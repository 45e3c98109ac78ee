//! Auth protocol wire types.
//!
//! Three JSON-over-HTTPS endpoints, all POST:
//! - `/validate`      — exchange credentials + fingerprint for a session token
//! - `/check-session` — ask whether a held token is still valid
//! - `/logout`        — invalidate a token server-side (response ignored)
//!
//! Field names are fixed by the server; do not rename them.

use serde::{Deserialize, Serialize};

/// Path of the validate endpoint, relative to the API base URL.
pub const VALIDATE_PATH: &str = "/validate";
/// Path of the session liveness endpoint.
pub const CHECK_SESSION_PATH: &str = "/check-session";
/// Path of the logout endpoint.
pub const LOGOUT_PATH: &str = "/logout";

/// Credentials exchange request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// Account username.
    pub username: String,
    /// SHA-256 of the license key, lowercase hex. Never the plaintext.
    pub key: String,
    /// Device fingerprint binding the license to this machine.
    pub hwid: String,
    /// Client version string, for server-side minimum-version gating.
    pub app_version: String,
}

/// Server response to a validate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Human-readable status, present on both outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error detail, used by some server versions instead of `message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Session token issued on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    /// Session expiry as seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl ValidateResponse {
    /// Returns the rejection text: explicit message, else explicit error,
    /// else a generic default.
    #[must_use]
    pub fn rejection_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Invalid credentials".to_string())
    }
}

/// Session liveness request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSessionRequest {
    /// Token issued by a prior validate exchange.
    pub session_token: String,
    /// Username bound to the session.
    pub username: String,
}

/// Server response to a liveness request.
///
/// A missing `valid` field deserializes to `false`: anything short of an
/// explicit affirmation is treated as session loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSessionResponse {
    /// Whether the token is still valid.
    #[serde(default)]
    pub valid: bool,
}

/// Logout notification. The server's response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Token being invalidated.
    pub session_token: String,
    /// Username bound to the session.
    pub username: String,
}
