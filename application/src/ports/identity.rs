//! Identity port
//!
//! Supplies the user id that namespaces quota records. Login, signup and
//! logout flows are outside the engine; whatever authenticates the user
//! hands an implementation of this port to the services.

/// Source of the current user's identity.
pub trait IdentityProvider: Send + Sync {
    /// Stable id of the current user (or an anonymous placeholder).
    fn user_id(&self) -> String;
}

/// Null-object identity for unauthenticated use.
pub struct AnonymousIdentity;

impl IdentityProvider for AnonymousIdentity {
    fn user_id(&self) -> String {
        "anonymous".to_string()
    }
}
