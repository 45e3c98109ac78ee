//! License validation and session lifecycle for keygate.
//!
//! The [`SessionManager`] is the state machine behind the login screen:
//!
//! 1. The UI calls [`SessionManager::validate_key`] with user-entered
//!    credentials. The manager hashes the key, attaches the device
//!    fingerprint, and exchanges them with the auth server.
//! 2. On success the manager holds the server-issued session token and the
//!    username; the UI polls [`SessionManager::is_authenticated`].
//! 3. [`SessionManager::check_session`] asks the server whether the token is
//!    still live; any ambiguous answer demotes the session.
//! 4. [`SessionManager::logout`] notifies the server best-effort and always
//!    clears local state.
//!
//! Session state lives in process memory only and does not survive restart.

mod config;
mod error;
mod integrity;
mod manager;
mod protocol;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use integrity::{BinaryChecksumIntegrity, IntegrityCheck, UncheckedIntegrity};
pub use manager::{SessionManager, ValidationOutcome};
pub use protocol::{
    CheckSessionRequest, CheckSessionResponse, LogoutRequest, ValidateRequest, ValidateResponse,
};
