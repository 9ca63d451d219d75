//! Ports (boundary contracts) consumed by the application services.
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod clock;
pub mod identity;
pub mod key_value_store;
pub mod reply_generator;
