//! Active plan state.
//!
//! One [`PlanState`] exists per process. It remembers which tier is active,
//! persists tier changes write-through, and falls back to FREE (rewriting
//! the stored value) when the persisted tier is unparseable.

use crate::ports::key_value_store::{keys, KeyValueStore};
use chatpro_domain::{DomainError, Feature, PlanDefinition, PlanTier};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// The active subscription plan, with write-through persistence.
pub struct PlanState {
    tier: Mutex<PlanTier>,
    store: Arc<dyn KeyValueStore>,
}

impl PlanState {
    /// Load the active tier from the store, defaulting to FREE.
    ///
    /// An invalid persisted value falls back to FREE and is overwritten so
    /// the next load is clean.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let tier = match store.load(&keys::current_plan()) {
            Ok(Some(raw)) => match raw.parse::<PlanTier>() {
                Ok(tier) => tier,
                Err(_) => {
                    warn!("Persisted plan tier '{}' is unknown, falling back to FREE", raw);
                    if let Err(e) = store.save(&keys::current_plan(), PlanTier::Free.as_str()) {
                        warn!("Could not rewrite invalid plan tier: {}", e);
                    }
                    PlanTier::Free
                }
            },
            Ok(None) => PlanTier::Free,
            Err(e) => {
                warn!("Could not load plan tier, defaulting to FREE: {}", e);
                PlanTier::Free
            }
        };

        debug!("Active plan tier: {}", tier);
        Self {
            tier: Mutex::new(tier),
            store,
        }
    }

    pub fn tier(&self) -> PlanTier {
        *self.tier.lock().expect("plan state lock poisoned")
    }

    /// The catalog entry for the active tier.
    pub fn definition(&self) -> &'static PlanDefinition {
        self.tier().definition()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.definition().features.has(feature)
    }

    /// Switch to the given tier and persist the change.
    pub fn set_plan(&self, tier: PlanTier) {
        *self.tier.lock().expect("plan state lock poisoned") = tier;
        self.persist(tier);
    }

    /// Switch by tier name; unknown names leave the state untouched.
    pub fn set_plan_by_name(&self, name: &str) -> Result<PlanTier, DomainError> {
        let tier = name.parse::<PlanTier>()?;
        self.set_plan(tier);
        Ok(tier)
    }

    /// Advance to the next tier in the upgrade cycle (wrapping).
    pub fn cycle_plan(&self) -> PlanTier {
        let next = self.tier().next();
        self.set_plan(next);
        next
    }

    fn persist(&self, tier: PlanTier) {
        if let Err(e) = self.store.save(&keys::current_plan(), tier.as_str()) {
            warn!("Could not persist plan tier: {}", e);
        }
    }
}
