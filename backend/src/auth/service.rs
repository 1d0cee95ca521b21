//! The `Authenticator` trait and its shared-secret implementation.

/// Capability check guarding the admin surface.
pub trait Authenticator: Send + Sync {
    /// Whether the presented secret grants admin access.
    fn verify(&self, presented: &str) -> bool;
}

/// Exact-equality comparison against one shared secret.
pub struct SharedSecretAuthenticator {
    secret: String,
}

impl SharedSecretAuthenticator {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

impl Authenticator for SharedSecretAuthenticator {
    fn verify(&self, presented: &str) -> bool {
        presented == self.secret
    }
}
