//! Admin access control.
//!
//! The admin surface sits behind a pluggable `Authenticator`; the shipped
//! implementation compares a shared secret from configuration. Hardening the
//! gate (hashing, sessions, rate limiting) is delegated to whatever real
//! provider is plugged in behind the same trait.

pub mod middleware;
pub mod service;

// Re-exports for convenience
pub use middleware::{require_admin, ADMIN_SECRET_HEADER};
pub use service::{Authenticator, SharedSecretAuthenticator};
