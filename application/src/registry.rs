//! Agent registry.
//!
//! The durable source of truth for agents: the five built-ins merged with
//! whatever custom agents were persisted. Built-in ids are reserved — a
//! persisted custom record colliding with one is discarded on load, and no
//! mutation ever touches a built-in.
//!
//! Every mutation re-serializes the full custom subset to the store
//! immediately (write-through). A failed save is logged; the in-memory
//! mutation stands.

use crate::ports::key_value_store::{keys, KeyValueStore};
use chatpro_domain::{
    builtin_agents, is_builtin_id, Agent, AgentDraft, AgentId, AgentPatch, DomainError,
    PlanDefinition,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Registry of built-in and custom agents with write-through persistence.
pub struct AgentRegistry {
    store: Arc<dyn KeyValueStore>,
    /// Built-ins first (fixed order), then customs in creation order.
    agents: Mutex<Vec<Agent>>,
}

impl AgentRegistry {
    /// Load the registry: built-ins plus persisted custom agents.
    ///
    /// Collision rules on load:
    /// - a custom record with a built-in id is discarded (and logged)
    /// - a later custom record with the same id as an earlier one replaces it
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut agents = builtin_agents();

        match store.load(&keys::custom_agents()) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Agent>>(&raw) {
                Ok(customs) => {
                    for mut custom in customs {
                        custom.is_custom = true;
                        Self::merge_custom(&mut agents, custom);
                    }
                }
                Err(e) => {
                    warn!("Corrupt custom-agent record, starting empty: {}", e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!("Could not load custom agents, starting empty: {}", e);
            }
        }

        debug!("Agent registry loaded with {} agents", agents.len());
        Self {
            store,
            agents: Mutex::new(agents),
        }
    }

    fn merge_custom(agents: &mut Vec<Agent>, custom: Agent) {
        if is_builtin_id(&custom.id) {
            warn!(
                "Custom agent id '{}' collides with a built-in, skipping",
                custom.id
            );
            return;
        }
        match agents.iter_mut().find(|a| a.id == custom.id) {
            // Duplicate custom id: the newer record wins
            Some(existing) => *existing = custom,
            None => agents.push(custom),
        }
    }

    /// All agents, built-ins first, then customs in creation order.
    pub fn list(&self) -> Vec<Agent> {
        self.agents.lock().expect("registry lock poisoned").clone()
    }

    pub fn find(&self, id: &AgentId) -> Option<Agent> {
        self.agents
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    /// Number of custom agents currently registered.
    pub fn custom_count(&self) -> usize {
        self.agents
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .filter(|a| a.is_custom)
            .count()
    }

    /// Create a custom agent under a fresh id.
    ///
    /// Fails only when the active plan's custom-agent cap is already used
    /// up; input validation is a caller concern.
    pub fn create(&self, draft: AgentDraft, plan: &PlanDefinition) -> Result<Agent, DomainError> {
        let mut agents = self.agents.lock().expect("registry lock poisoned");

        let custom_count = agents.iter().filter(|a| a.is_custom).count();
        if !plan.max_custom_agents.permits_another(custom_count) {
            return Err(DomainError::CustomAgentLimitReached {
                limit: plan.max_custom_agents.limit().unwrap_or(0),
            });
        }

        let agent = Agent::custom(AgentId::generate(), draft);
        agents.push(agent.clone());
        self.persist_customs(&agents);
        Ok(agent)
    }

    /// Apply a partial update to a custom agent.
    ///
    /// Returns false (and changes nothing) when the target is missing or a
    /// built-in.
    pub fn update(&self, id: &AgentId, patch: AgentPatch) -> bool {
        let mut agents = self.agents.lock().expect("registry lock poisoned");
        let Some(agent) = agents.iter_mut().find(|a| &a.id == id && a.is_custom) else {
            return false;
        };
        patch.apply(agent);
        self.persist_customs(&agents);
        true
    }

    /// Delete a custom agent. Built-ins and unknown ids are a no-op.
    pub fn delete(&self, id: &AgentId) -> bool {
        let mut agents = self.agents.lock().expect("registry lock poisoned");
        let before = agents.len();
        agents.retain(|a| !(&a.id == id && a.is_custom));
        if agents.len() == before {
            return false;
        }
        self.persist_customs(&agents);
        true
    }

    fn persist_customs(&self, agents: &[Agent]) {
        let customs: Vec<&Agent> = agents.iter().filter(|a| a.is_custom).collect();
        match serde_json::to_string(&customs) {
            Ok(blob) => {
                if let Err(e) = self.store.save(&keys::custom_agents(), &blob) {
                    warn!("Could not persist custom agents: {}", e);
                }
            }
            Err(e) => warn!("Could not serialize custom agents: {}", e),
        }
    }
}
