//! Agent domain.
//!
//! - [`entities::Agent`] — a chat persona (built-in or user-created)
//! - [`entities::builtin_agents`] — the fixed set shipped with the product
//! - [`value_objects::AgentId`] — opaque, stable agent identifier

pub mod entities;
pub mod value_objects;
