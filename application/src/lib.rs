//! Application layer for chatpro
//!
//! This crate contains the stateful services of the entitlement and
//! session engine, plus the port definitions they depend on. It depends
//! only on the domain layer; adapters for the ports live in the
//! infrastructure layer.
//!
//! The services are explicit context objects, constructed once per process
//! and threaded into the [`ChatSession`] controller — nothing here is
//! ambient or globally reachable.

pub mod config;
pub mod plan_state;
pub mod ports;
pub mod quota;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::SessionParams;
pub use plan_state::PlanState;
pub use ports::{
    clock::Clock,
    identity::{AnonymousIdentity, IdentityProvider},
    key_value_store::{keys, KeyValueStore, StoreError},
    reply_generator::ReplyGenerator,
};
pub use quota::QuotaTracker;
pub use registry::AgentRegistry;
pub use session::{ChatSession, SessionEvent};
