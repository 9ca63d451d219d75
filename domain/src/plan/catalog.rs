//! The static plan catalog.
//!
//! Four tiers, totally ordered by entitlement: FREE < PLUS < PRO <
//! INTERPLASE. Every limit and feature of a tier is a superset of the tier
//! below it. Definitions are compile-time constants and never change at
//! runtime.

use crate::agent::value_objects::AgentId;
use crate::plan::features::{FeatureSet, HistoryMode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity of a subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    Free,
    Plus,
    Pro,
    Interplase,
}

impl PlanTier {
    /// All tiers in ascending entitlement order.
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Plus,
        PlanTier::Pro,
        PlanTier::Interplase,
    ];

    /// Canonical storage form (also what the persisted plan key holds).
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "FREE",
            PlanTier::Plus => "PLUS",
            PlanTier::Pro => "PRO",
            PlanTier::Interplase => "INTERPLASE",
        }
    }

    /// The next tier in the upgrade cycle, wrapping back to FREE.
    pub fn next(&self) -> PlanTier {
        match self {
            PlanTier::Free => PlanTier::Plus,
            PlanTier::Plus => PlanTier::Pro,
            PlanTier::Pro => PlanTier::Interplase,
            PlanTier::Interplase => PlanTier::Free,
        }
    }

    /// The static entitlement bundle for this tier.
    pub fn definition(&self) -> &'static PlanDefinition {
        match self {
            PlanTier::Free => &FREE,
            PlanTier::Plus => &PLUS,
            PlanTier::Pro => &PRO,
            PlanTier::Interplase => &INTERPLASE,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" | "GRATUITO" => Ok(PlanTier::Free),
            "PLUS" => Ok(PlanTier::Plus),
            "PRO" => Ok(PlanTier::Pro),
            "INTERPLASE" => Ok(PlanTier::Interplase),
            other => Err(crate::core::error::DomainError::InvalidPlanTier(
                other.to_string(),
            )),
        }
    }
}

/// Daily message allowance of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageQuota {
    Limited(u32),
    Unlimited,
}

impl MessageQuota {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, MessageQuota::Unlimited)
    }

    /// The finite limit, if any.
    pub fn limit(&self) -> Option<u32> {
        match self {
            MessageQuota::Limited(n) => Some(*n),
            MessageQuota::Unlimited => None,
        }
    }
}

impl std::fmt::Display for MessageQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageQuota::Limited(n) => write!(f, "{}", n),
            MessageQuota::Unlimited => write!(f, "∞"),
        }
    }
}

/// Which built-in agents a plan whitelists.
///
/// Custom agents are outside the allowlist entirely; their availability is
/// decided by the `custom_agents` feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAllowlist {
    Ids(&'static [&'static str]),
    All,
}

impl AgentAllowlist {
    pub fn permits(&self, id: &AgentId) -> bool {
        match self {
            AgentAllowlist::Ids(ids) => ids.contains(&id.as_str()),
            AgentAllowlist::All => true,
        }
    }
}

/// How many custom agents a plan allows the user to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomAgentLimit {
    Limited(u32),
    Unlimited,
}

impl CustomAgentLimit {
    /// Whether one more custom agent fits given the current count.
    pub fn permits_another(&self, current: usize) -> bool {
        match self {
            CustomAgentLimit::Limited(n) => current < *n as usize,
            CustomAgentLimit::Unlimited => true,
        }
    }

    pub fn limit(&self) -> Option<u32> {
        match self {
            CustomAgentLimit::Limited(n) => Some(*n),
            CustomAgentLimit::Unlimited => None,
        }
    }
}

/// The full entitlement bundle of one plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDefinition {
    pub tier: PlanTier,
    pub display_name: &'static str,
    pub max_messages_per_day: MessageQuota,
    pub allowed_agents: AgentAllowlist,
    pub max_custom_agents: CustomAgentLimit,
    pub features: FeatureSet,
}

const FREE: PlanDefinition = PlanDefinition {
    tier: PlanTier::Free,
    display_name: "Gratuito",
    max_messages_per_day: MessageQuota::Limited(10),
    allowed_agents: AgentAllowlist::Ids(&["coach"]),
    max_custom_agents: CustomAgentLimit::Limited(1),
    features: FeatureSet {
        voice: false,
        image_generation: false,
        file_upload: false,
        history: HistoryMode::Off,
        export_chat: false,
        custom_agents: true,
        make_integration: false,
        api_integration: false,
        plugins: false,
        multiple_ai: false,
        video_generation: false,
        automation_dashboard: false,
    },
};

const PLUS: PlanDefinition = PlanDefinition {
    tier: PlanTier::Plus,
    display_name: "Plus",
    max_messages_per_day: MessageQuota::Limited(50),
    allowed_agents: AgentAllowlist::Ids(&["coach", "redator", "dev", "terapeuta", "estrategista"]),
    max_custom_agents: CustomAgentLimit::Limited(5),
    features: FeatureSet {
        voice: false,
        image_generation: true,
        file_upload: false,
        history: HistoryMode::Local,
        export_chat: false,
        custom_agents: true,
        make_integration: false,
        api_integration: false,
        plugins: false,
        multiple_ai: false,
        video_generation: false,
        automation_dashboard: false,
    },
};

const PRO: PlanDefinition = PlanDefinition {
    tier: PlanTier::Pro,
    display_name: "Pro",
    max_messages_per_day: MessageQuota::Unlimited,
    allowed_agents: AgentAllowlist::All,
    max_custom_agents: CustomAgentLimit::Unlimited,
    features: FeatureSet {
        voice: true,
        image_generation: true,
        file_upload: false,
        history: HistoryMode::Remote,
        export_chat: true,
        custom_agents: true,
        make_integration: true,
        api_integration: false,
        plugins: false,
        multiple_ai: false,
        video_generation: false,
        automation_dashboard: false,
    },
};

const INTERPLASE: PlanDefinition = PlanDefinition {
    tier: PlanTier::Interplase,
    display_name: "Interplase",
    max_messages_per_day: MessageQuota::Unlimited,
    allowed_agents: AgentAllowlist::All,
    max_custom_agents: CustomAgentLimit::Unlimited,
    features: FeatureSet {
        voice: true,
        image_generation: true,
        file_upload: true,
        history: HistoryMode::Remote,
        export_chat: true,
        custom_agents: true,
        make_integration: true,
        api_integration: true,
        plugins: true,
        multiple_ai: true,
        video_generation: true,
        automation_dashboard: true,
    },
};
