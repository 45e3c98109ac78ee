//! Device identity and credential hashing for keygate.
//!
//! This crate provides the two pure building blocks of the login flow:
//! - A stable hardware fingerprint (HWID) that binds a license to one machine
//! - A one-way transform applied to the license key before it leaves the host
//!
//! Both are deterministic SHA-256 digests rendered as lowercase hex, so the
//! server can treat them as opaque comparison keys.

mod fingerprint;
mod secret;

pub use fingerprint::DeviceFingerprint;
pub use secret::hash_secret;
