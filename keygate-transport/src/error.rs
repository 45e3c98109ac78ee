//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur while talking to the auth server.
///
/// The session layer deliberately collapses all of these into a single
/// "failed to connect" outcome for the user; the variants exist for
/// diagnostics, not for branching.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    /// The request did not complete (connect failure, timeout, TLS failure).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

impl TransportError {
    /// Returns true if the failure was a wall-clock timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) | TransportError::Body(e) => e.is_timeout(),
            TransportError::ClientBuild(_) => false,
        }
    }
}
