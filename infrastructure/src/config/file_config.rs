//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly.

use chatpro_application::SessionParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Identity settings
    pub user: FileUserConfig,
    /// Persistence settings
    pub store: FileStoreConfig,
    /// Session timing settings
    pub session: FileSessionConfig,
}

/// `[user]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUserConfig {
    /// Id namespacing the quota records.
    pub id: String,
}

impl Default for FileUserConfig {
    fn default() -> Self {
        Self {
            id: "anonymous".to_string(),
        }
    }
}

/// `[store]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Path of the JSON store file; defaults to the platform data dir.
    pub path: Option<PathBuf>,
}

/// `[session]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    pub image_delay_ms: u64,
    pub voice_delay_ms: u64,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1500,
            reply_delay_max_ms: 2500,
            image_delay_ms: 2500,
            voice_delay_ms: 3000,
        }
    }
}

impl FileConfig {
    /// Convert the `[session]` section into engine parameters.
    ///
    /// An inverted delay range is normalized instead of rejected.
    pub fn session_params(&self) -> SessionParams {
        let min = Duration::from_millis(
            self.session
                .reply_delay_min_ms
                .min(self.session.reply_delay_max_ms),
        );
        let max = Duration::from_millis(
            self.session
                .reply_delay_min_ms
                .max(self.session.reply_delay_max_ms),
        );
        SessionParams {
            reply_delay_min: min,
            reply_delay_max: max,
            image_delay: Duration::from_millis(self.session.image_delay_ms),
            voice_delay: Duration::from_millis(self.session.voice_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_product_timings() {
        let params = FileConfig::default().session_params();
        assert_eq!(params.reply_delay_min, Duration::from_millis(1500));
        assert_eq!(params.reply_delay_max, Duration::from_millis(2500));
        assert_eq!(params.voice_delay, Duration::from_millis(3000));
    }

    #[test]
    fn inverted_delay_range_is_normalized() {
        let config = FileConfig {
            session: FileSessionConfig {
                reply_delay_min_ms: 900,
                reply_delay_max_ms: 100,
                ..Default::default()
            },
            ..Default::default()
        };
        let params = config.session_params();
        assert!(params.reply_delay_min <= params.reply_delay_max);
    }
}
