//! Device fingerprinting for license binding.
//!
//! Generates a stable hardware fingerprint (HWID) that identifies this
//! machine. The server stores it alongside the license and rejects
//! validations from other installations.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;

/// A stable fingerprint that identifies this device.
///
/// The id is the SHA-256 of the machine's identifying strings, rendered as
/// 64 lowercase hex characters. It is an opaque comparison key: the server
/// never decodes it and neither should callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFingerprint {
    /// The fingerprint ID (hash of host identifiers).
    id: String,
    /// How many identity sources contributed to the hash.
    components: usize,
}

impl DeviceFingerprint {
    /// Generates a fingerprint for the current device.
    ///
    /// Combines hostname, account name, and (where the platform exposes one)
    /// a machine id. Sources that cannot be read are skipped rather than
    /// failing the call, so the fingerprint can change between runs if a
    /// source becomes unavailable. Check [`components`](Self::components)
    /// when a degraded fingerprint matters.
    #[must_use]
    pub fn generate() -> Self {
        let components = collect_host_ids();
        let combined = components.join("|");

        let mut hasher = Sha256::new();
        hasher.update(combined.as_bytes());
        let hash = hasher.finalize();

        Self {
            id: hex::encode(hash),
            components: components.len(),
        }
    }

    /// Returns the fingerprint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns how many identity sources contributed to this fingerprint.
    ///
    /// A value below the platform's usual count means a source was
    /// unreadable and the fingerprint may not be stable across runs.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Validates that this fingerprint matches the current device.
    #[must_use]
    pub fn matches_current(&self) -> bool {
        let current = Self::generate();
        self.id == current.id
    }
}

/// Collects host identifiers in a fixed order.
fn collect_host_ids() -> Vec<String> {
    let mut ids = Vec::new();

    if let Some(host) = get_hostname() {
        ids.push(host);
    }

    // Logged-in account name
    if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
        ids.push(user);
    }

    // Machine ID (platform-specific, very stable)
    if let Some(machine_id) = get_machine_id() {
        ids.push(machine_id);
    }

    ids
}

/// Gets the machine hostname.
fn get_hostname() -> Option<String> {
    hostname::get().ok().and_then(|h| h.into_string().ok())
}

/// Gets the machine ID (platform-specific unique identifier).
fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        // Try /etc/machine-id first, then /var/lib/dbus/machine-id
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "windows")]
    {
        // MachineGuid from the registry would go here; the hostname and
        // account name components carry Windows installs for now.
        None
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        None
    }
}
