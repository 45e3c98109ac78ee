//! One-way credential hashing.

use sha2::{Digest, Sha256};

/// Hashes a license key or password for transmission.
///
/// Returns the SHA-256 of the secret's UTF-8 bytes as 64 lowercase hex
/// characters. Deterministic and one-way; there is no decode operation.
///
/// This is what crosses the wire instead of the plaintext, but an unsalted
/// hash is replayable by anyone who observes it — it is a compatibility
/// measure for the existing server protocol, not a secrecy mechanism. Real
/// deployments must pair it with TLS and a server-issued nonce.
#[must_use]
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
