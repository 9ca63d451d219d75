//! Infrastructure layer for chatpro
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod clock;
pub mod config;
pub mod identity;
pub mod reply;
pub mod store;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{ConfigLoader, FileConfig};
pub use identity::FixedIdentity;
pub use reply::TemplateReplyGenerator;
pub use store::{JsonFileStore, MemoryStore};
