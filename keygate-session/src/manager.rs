//! The session state machine.
//!
//! Owns the current authentication state and orchestrates the three protocol
//! exchanges. All network work is async so the presentation layer can keep
//! its event loop responsive; state queries are cheap and lock only briefly.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::integrity::{IntegrityCheck, UncheckedIntegrity};
use crate::protocol::{
    CheckSessionRequest, CheckSessionResponse, LogoutRequest, ValidateRequest, ValidateResponse,
};
use chrono::{DateTime, TimeZone, Utc};
use keygate_device::{hash_secret, DeviceFingerprint};
use keygate_transport::{HttpTransport, TransportConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Outcome of a validate exchange, handed back to the presentation layer.
///
/// Not retained by the manager; poll
/// [`is_authenticated`](SessionManager::is_authenticated) for current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the session is now authenticated.
    pub success: bool,
    /// Human-readable status for display.
    pub message: String,
    /// Session expiry, when the server provided one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ValidationOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            expires_at: None,
        }
    }
}

/// Current session state. Invariant: `authenticated` implies a non-empty
/// `session_token`.
#[derive(Debug, Default)]
struct SessionState {
    authenticated: bool,
    session_token: String,
    username: String,
}

impl SessionState {
    fn clear(&mut self) {
        self.authenticated = false;
        self.session_token.clear();
        self.username.clear();
    }
}

/// Client-side license/session authentication state machine.
///
/// Created unauthenticated; populated by a successful
/// [`validate_key`](Self::validate_key); cleared by
/// [`logout`](Self::logout) or a failed [`check_session`](Self::check_session).
///
/// Call [`shutdown`](Self::shutdown) on teardown: it suppresses any
/// validation still in flight and performs the best-effort remote logout.
/// `Drop` cannot run async I/O, so teardown is explicit.
pub struct SessionManager {
    config: SessionConfig,
    transport: HttpTransport,
    integrity: Arc<dyn IntegrityCheck>,
    state: Arc<RwLock<SessionState>>,
    validating: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

impl SessionManager {
    /// Creates a manager with no integrity checking.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be constructed.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        Self::with_integrity(config, Arc::new(UncheckedIntegrity))
    }

    /// Creates a manager with the given integrity check.
    ///
    /// The check runs once here and again before every validate exchange. A
    /// failure at construction is logged but does not prevent creation, so
    /// the presentation layer can surface the condition; validation is
    /// blocked until the check passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be constructed.
    pub fn with_integrity(
        config: SessionConfig,
        integrity: Arc<dyn IntegrityCheck>,
    ) -> SessionResult<Self> {
        let transport = HttpTransport::new(&TransportConfig {
            timeout_secs: config.timeout_secs,
            user_agent: format!("{}/{}", config.app_name, config.app_version),
        })?;

        if !integrity.verify() {
            warn!("client integrity check failed at startup");
        }

        Ok(Self {
            config,
            transport,
            integrity,
            state: Arc::new(RwLock::new(SessionState::default())),
            validating: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Exchanges credentials for a session.
    ///
    /// Exactly one validation may be in flight per manager; a concurrent
    /// second call fails with [`SessionError::ValidationInFlight`] without
    /// touching the network or the session state.
    ///
    /// Protocol-level failures (empty input, unreachable server, rejected
    /// credentials, malformed response) are reported through the returned
    /// [`ValidationOutcome`], never as `Err`; the manager stays reusable.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ValidationInFlight`] when called concurrently
    /// and [`SessionError::ShuttingDown`] when shutdown was requested before
    /// the result could be applied.
    pub async fn validate_key(
        &self,
        username: &str,
        key: &str,
    ) -> SessionResult<ValidationOutcome> {
        let _guard = FlightGuard::acquire(&self.validating)?;

        if !self.integrity.verify() {
            warn!("client integrity check failed; refusing to send credentials");
            return Ok(ValidationOutcome::failure("Application integrity compromised"));
        }

        if username.is_empty() || key.is_empty() {
            return Ok(ValidationOutcome::failure("Username and key are required"));
        }

        let request = ValidateRequest {
            username: username.to_string(),
            key: hash_secret(key),
            hwid: DeviceFingerprint::generate().id().to_string(),
            app_version: self.config.app_version.clone(),
        };

        let response = self
            .transport
            .post_json(&self.config.validate_url(), &request)
            .await;

        // Cooperative cancellation: honored only at the publication boundary.
        // The request was allowed to complete; its effect is suppressed.
        if self.shutdown.load(Ordering::SeqCst) {
            debug!("shutdown requested; discarding validation result");
            return Err(SessionError::ShuttingDown);
        }

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "validate exchange failed at transport level");
                self.state.write().await.clear();
                return Ok(ValidationOutcome::failure("Failed to connect to server"));
            }
        };

        let parsed: ValidateResponse = match serde_json::from_str(&response.body) {
            Ok(p) => p,
            Err(e) => {
                debug!(status = response.status, error = %e, "unparseable validate response");
                return Ok(ValidationOutcome::failure("Invalid server response"));
            }
        };

        if !parsed.success {
            let message = parsed.rejection_message();
            debug!(rejection = %message, "server rejected credentials");
            self.state.write().await.clear();
            return Ok(ValidationOutcome::failure(message));
        }

        // A success without a token cannot satisfy the authenticated ⇒
        // non-empty-token invariant; treat it as a protocol error.
        let token = match parsed.session_token.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                warn!("validate response claimed success without a session token");
                return Ok(ValidationOutcome::failure("Invalid server response"));
            }
        };

        let expires_at = parsed
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());

        {
            let mut state = self.state.write().await;
            state.authenticated = true;
            state.session_token = token;
            // The input username, not a server-echoed value
            state.username = username.to_string();
        }
        info!(username, "session authenticated");

        Ok(ValidationOutcome {
            success: true,
            message: parsed
                .message
                .unwrap_or_else(|| "Login successful".to_string()),
            expires_at,
        })
    }

    /// Asks the server whether the held session token is still valid.
    ///
    /// Returns false without a network call when unauthenticated. Any
    /// outcome short of a parseable `{"valid": true}` — transport failure,
    /// malformed body, explicit rejection — demotes the session to
    /// unauthenticated before returning false. Ambiguity is treated as
    /// session loss, never as continued trust.
    pub async fn check_session(&self) -> bool {
        let request = {
            let state = self.state.read().await;
            if !state.authenticated || state.session_token.is_empty() {
                return false;
            }
            CheckSessionRequest {
                session_token: state.session_token.clone(),
                username: state.username.clone(),
            }
        };

        let valid = match self
            .transport
            .post_json(&self.config.check_session_url(), &request)
            .await
        {
            Ok(response) => serde_json::from_str::<CheckSessionResponse>(&response.body)
                .map(|r| r.valid)
                .unwrap_or_else(|e| {
                    debug!(error = %e, "unparseable check-session response");
                    false
                }),
            Err(e) => {
                debug!(error = %e, "check-session exchange failed at transport level");
                false
            }
        };

        if !valid {
            info!("session no longer valid; demoting to unauthenticated");
            self.state.write().await.clear();
        }
        valid
    }

    /// Ends the session.
    ///
    /// If a token is held the server is notified best-effort; the result is
    /// ignored because the point of logout is to stop trusting the local
    /// session, which must succeed even with the network down. Local state
    /// is always cleared.
    pub async fn logout(&self) {
        let request = {
            let state = self.state.read().await;
            if state.session_token.is_empty() {
                None
            } else {
                Some(LogoutRequest {
                    session_token: state.session_token.clone(),
                    username: state.username.clone(),
                })
            }
        };

        if let Some(request) = request {
            if let Err(e) = self
                .transport
                .post_json(&self.config.logout_url(), &request)
                .await
            {
                debug!(error = %e, "logout notification failed; clearing local state anyway");
            }
        }

        self.state.write().await.clear();
        info!("session cleared");
    }

    /// Requests shutdown and tears the session down.
    ///
    /// Sets the cancellation flag so an in-flight validation discards its
    /// result instead of publishing it, then logs out if still
    /// authenticated.
    pub async fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if self.is_authenticated().await {
            self.logout().await;
        }
    }

    /// Returns whether a session is currently authenticated.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.authenticated
    }

    /// Returns the username bound to the current session, or an empty
    /// string when unauthenticated.
    pub async fn username(&self) -> String {
        self.state.read().await.username.clone()
    }

    /// Returns the held session token, or an empty string when
    /// unauthenticated.
    pub async fn session_token(&self) -> String {
        self.state.read().await.session_token.clone()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// RAII single-flight guard: set on entry, released on every exit path.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> SessionResult<Self> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::ValidationInFlight);
        }
        Ok(Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
