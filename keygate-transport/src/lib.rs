//! JSON-over-HTTPS transport for the keygate auth protocol.
//!
//! A thin wrapper over reqwest with the guarantees the session layer relies
//! on: every request has a bounded timeout, TLS certificate and hostname
//! verification stay on for https URLs, and no call ever panics — failures
//! come back as [`TransportError`].

mod client;
mod error;

pub use client::{HttpResponse, HttpTransport, TransportConfig};
pub use error::{TransportError, TransportResult};
