//! Configuration file loading.
//!
//! - [`file_config::FileConfig`] — raw TOML structure
//! - [`loader::ConfigLoader`] — figment-based merge of defaults, global
//!   config, project config and an explicit path

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileSessionConfig, FileStoreConfig, FileUserConfig};
pub use loader::ConfigLoader;
