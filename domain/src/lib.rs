//! Domain layer for chatpro
//!
//! This crate contains the core business logic of the entitlement and
//! session engine. It has no dependencies on infrastructure or
//! presentation concerns, and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Plans and Entitlements
//!
//! Every capability of the chat product is gated by the active subscription
//! plan. The [`plan`] module holds the immutable catalog of tiers; the
//! [`entitlement`] module derives from it what a user may actually do:
//!
//! - **Agent availability**: which personas the user can talk to
//! - **Feature flags**: voice input, image generation, export, etc.
//! - **Quota limits**: how many messages per calendar day
//!
//! ## Agents
//!
//! An agent is a persona (name, avatar, system prompt). Five built-in
//! agents ship with the product; users can create custom ones, up to the
//! limit of their plan.

pub mod agent;
pub mod core;
pub mod entitlement;
pub mod plan;
pub mod quota;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use agent::{
    entities::{builtin_agents, is_builtin_id, Agent, AgentDraft, AgentPatch},
    value_objects::AgentId,
};
pub use core::error::DomainError;
pub use entitlement::{has_feature, resolve, EffectiveAgent};
pub use plan::{
    catalog::{AgentAllowlist, CustomAgentLimit, MessageQuota, PlanDefinition, PlanTier},
    features::{Feature, FeatureSet, HistoryMode},
};
pub use quota::{is_exhausted, QuotaKey};
pub use session::entities::{Message, MessagePayload, Sender, SessionState};
