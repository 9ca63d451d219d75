//! Key-value persistence port
//!
//! The engine persists three kinds of records: the custom-agent list, the
//! active plan tier, and per-(user, day) quota counters. All of them go
//! through this port as opaque string blobs.
//!
//! Failure policy: a failed load is treated as "absent" (callers fall back
//! to defaults); a failed save is logged by the caller and never blocks the
//! in-memory mutation.

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Load failed for key '{key}': {reason}")]
    LoadFailed { key: String, reason: String },

    #[error("Save failed for key '{key}': {reason}")]
    SaveFailed { key: String, reason: String },
}

/// Key-value persistence collaborator.
///
/// Implementations must be cheap to call from a single control-flow
/// context; all engine writes are write-through, one `save` per mutation.
pub trait KeyValueStore: Send + Sync {
    /// Load the blob stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store key builders.
///
/// The key shapes mirror the product's original local-storage names, so a
/// store migrated from the web client keeps working.
pub mod keys {
    /// The serialized custom-agent list.
    pub fn custom_agents() -> String {
        "chatpro_custom_agents".to_string()
    }

    /// The active plan tier name.
    pub fn current_plan() -> String {
        "chatpro_current_plan_name".to_string()
    }

    /// The message counter for one user on one local calendar day.
    pub fn message_count(user_id: &str, day: &str) -> String {
        format!("chatpro_messageCount_{}_{}", user_id, day)
    }
}
