//! Session error types.
//!
//! Protocol-level failures (bad credentials, unreachable server, malformed
//! responses) are not errors here — they come back as a
//! [`ValidationOutcome`](crate::ValidationOutcome) with `success == false`
//! and the manager stays usable. `SessionError` is reserved for caller
//! contract violations and teardown.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur in session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A validation was started while a previous one is still in flight.
    #[error("a validation is already in progress")]
    ValidationInFlight,

    /// Shutdown was requested; the exchange's result was discarded.
    #[error("session manager is shutting down")]
    ShuttingDown,

    /// The HTTP client could not be constructed.
    #[error("transport setup failed: {0}")]
    Transport(#[from] keygate_transport::TransportError),
}
