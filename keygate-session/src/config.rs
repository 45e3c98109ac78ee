//! Session manager configuration.

use crate::protocol::{CHECK_SESSION_PATH, LOGOUT_PATH, VALIDATE_PATH};
use serde::{Deserialize, Serialize};

/// Configuration for a [`SessionManager`](crate::SessionManager).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the auth API (e.g. `https://auth.example.com/api`).
    /// No trailing slash; endpoint paths are joined onto it.
    pub base_url: String,
    /// Client version reported to the server.
    pub app_version: String,
    /// Product name, shown by the presentation layer.
    pub app_name: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://auth.keygate.app/api".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            app_name: "Keygate".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SessionConfig {
    /// Full URL of the validate endpoint.
    #[must_use]
    pub fn validate_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), VALIDATE_PATH)
    }

    /// Full URL of the session liveness endpoint.
    #[must_use]
    pub fn check_session_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHECK_SESSION_PATH
        )
    }

    /// Full URL of the logout endpoint.
    #[must_use]
    pub fn logout_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LOGOUT_PATH)
    }
}
