//! Subscription plan domain.
//!
//! - [`catalog::PlanTier`] — the four tier identities, totally ordered
//! - [`catalog::PlanDefinition`] — the static entitlement bundle per tier
//! - [`features::FeatureSet`] — per-tier feature flags
//!
//! The catalog is defined once, at compile time, and never mutated.

pub mod catalog;
pub mod features;
