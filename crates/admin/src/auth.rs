//! Admin password gate.
//!
//! Access is a single shared password compared against `ADMIN_PASSWORD`.
//! There are no accounts, no hashing, and no sessions that outlive the
//! process; this is an accepted limitation of the deployment, not a layer
//! waiting to be added.

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

/// Guards entry to the admin view.
pub struct AdminGate {
    password: SecretString,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminGate {
    /// Create a gate for the configured password.
    #[must_use]
    pub const fn new(password: SecretString) -> Self {
        Self { password }
    }

    /// Check a login attempt.
    ///
    /// Comparison is constant-time so the attempt length/prefix leaks
    /// nothing through timing.
    #[must_use]
    pub fn check(&self, attempt: &str) -> bool {
        let ok = constant_time_compare(self.password.expose_secret(), attempt);
        if ok {
            info!("Admin login accepted");
        } else {
            warn!("Admin login rejected");
        }
        ok
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
