//! Identity adapter.

use chatpro_application::IdentityProvider;

/// Identity pinned to a configured user id.
///
/// The real login flow is outside the engine; the binary constructs this
/// from configuration (or falls back to the anonymous placeholder).
pub struct FixedIdentity {
    user_id: String,
}

impl FixedIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for FixedIdentity {
    fn user_id(&self) -> String {
        self.user_id.clone()
    }
}
