//! Pre-flight client integrity checking.
//!
//! Before any credential is sent, the session manager asks an injected
//! [`IntegrityCheck`] whether the running client is authentic. The check is
//! a trait so deployments can supply signature verification or whatever
//! their threat model requires.

use sha2::{Digest, Sha256};
use std::fs;
use tracing::warn;

/// Verifies the authenticity of the running client.
pub trait IntegrityCheck: Send + Sync {
    /// Returns true if the client passes the check.
    fn verify(&self) -> bool;
}

/// An integrity check that checks nothing.
///
/// Always passes. The name is deliberate: a manager built with this has no
/// tamper protection at all, and shipping it where a real check is expected
/// provides a false sense of security.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncheckedIntegrity;

impl IntegrityCheck for UncheckedIntegrity {
    fn verify(&self) -> bool {
        true
    }
}

/// Compares the running executable's SHA-256 against an expected digest.
///
/// The expected digest is produced at release time from the shipped binary
/// and supplied by the caller; how it is distributed and protected is out of
/// scope here.
#[derive(Debug, Clone)]
pub struct BinaryChecksumIntegrity {
    expected_sha256: String,
}

impl BinaryChecksumIntegrity {
    /// Creates a check expecting the given lowercase-hex SHA-256 digest.
    #[must_use]
    pub fn new(expected_sha256: impl Into<String>) -> Self {
        Self {
            expected_sha256: expected_sha256.into().to_lowercase(),
        }
    }

    fn current_exe_digest() -> Option<String> {
        let path = std::env::current_exe().ok()?;
        let bytes = fs::read(path).ok()?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Some(hex::encode(hasher.finalize()))
    }
}

impl IntegrityCheck for BinaryChecksumIntegrity {
    fn verify(&self) -> bool {
        match Self::current_exe_digest() {
            Some(digest) => digest == self.expected_sha256,
            None => {
                // Unreadable binary counts as failed, not skipped
                warn!("could not read running executable for integrity check");
                false
            }
        }
    }
}
