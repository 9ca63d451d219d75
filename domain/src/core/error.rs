//! Domain error types

use crate::plan::features::Feature;
use thiserror::Error;

/// Domain-level errors
///
/// Every variant is recoverable: a denied action surfaces as a notice and
/// leaves prior state intact. Nothing in this taxonomy terminates a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Agent '{0}' is not available on the current plan")]
    AgentUnavailable(String),

    #[error("Daily message limit of {limit} reached")]
    QuotaExceeded { limit: u32 },

    #[error("Feature '{0}' requires a higher plan")]
    FeatureLocked(Feature),

    #[error("Unknown plan tier: {0}")]
    InvalidPlanTier(String),

    #[error("Custom agent limit of {limit} reached for the current plan")]
    CustomAgentLimitReached { limit: u32 },
}

impl DomainError {
    /// Check if this error is an entitlement denial (as opposed to bad input)
    pub fn is_entitlement_denial(&self) -> bool {
        matches!(
            self,
            DomainError::AgentUnavailable(_)
                | DomainError::QuotaExceeded { .. }
                | DomainError::FeatureLocked(_)
                | DomainError::CustomAgentLimitReached { .. }
        )
    }
}
