//! Key-value store adapters.
//!
//! - [`json_file::JsonFileStore`] — one JSON object persisted to disk
//! - [`memory::MemoryStore`] — ephemeral map for tests and `--ephemeral`

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
