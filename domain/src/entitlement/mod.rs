//! Entitlement resolution.
//!
//! One pure gating rule shared by every caller, so "can see" and "can use"
//! checks never drift apart. No stored state: callers re-resolve whenever
//! the active plan or the agent set changes.

use crate::agent::entities::Agent;
use crate::plan::catalog::{AgentAllowlist, PlanDefinition};
use crate::plan::features::Feature;

/// An agent together with its availability under a specific plan.
///
/// Derived data, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveAgent {
    pub agent: Agent,
    pub unavailable: bool,
}

impl EffectiveAgent {
    pub fn is_available(&self) -> bool {
        !self.unavailable
    }
}

/// Resolve the availability of each agent under the given plan.
///
/// An agent is available when the plan whitelists its id, or the plan
/// carries the all-builtins wildcard, or the agent is custom.
pub fn resolve(plan: &PlanDefinition, agents: &[Agent]) -> Vec<EffectiveAgent> {
    agents
        .iter()
        .map(|agent| {
            let available = plan.allowed_agents.permits(&agent.id)
                || plan.allowed_agents == AgentAllowlist::All
                || agent.is_custom;
            EffectiveAgent {
                agent: agent.clone(),
                unavailable: !available,
            }
        })
        .collect()
}

/// Whether the plan grants the given feature.
pub fn has_feature(plan: &PlanDefinition, feature: Feature) -> bool {
    plan.features.has(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::entities::{builtin_agents, AgentDraft};
    use crate::agent::value_objects::AgentId;
    use crate::plan::catalog::PlanTier;

    fn custom_agent(id: &str) -> Agent {
        Agent::custom(
            AgentId::new(id),
            AgentDraft {
                name: "Custom".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn free_plan_only_permits_coach_among_builtins() {
        let views = resolve(PlanTier::Free.definition(), &builtin_agents());
        for view in &views {
            let expected_available = view.agent.id.as_str() == "coach";
            assert_eq!(
                view.is_available(),
                expected_available,
                "unexpected availability for {}",
                view.agent.id
            );
        }
    }

    #[test]
    fn plus_plan_permits_all_builtins() {
        let views = resolve(PlanTier::Plus.definition(), &builtin_agents());
        assert!(views.iter().all(EffectiveAgent::is_available));
    }

    #[test]
    fn wildcard_permits_everything() {
        let mut agents = builtin_agents();
        agents.push(custom_agent("abc-123"));
        let views = resolve(PlanTier::Pro.definition(), &agents);
        assert!(views.iter().all(EffectiveAgent::is_available));
    }

    #[test]
    fn custom_agents_are_available_even_on_free() {
        let agents = vec![custom_agent("abc-123")];
        let views = resolve(PlanTier::Free.definition(), &agents);
        assert!(views[0].is_available());
    }

    #[test]
    fn resolution_preserves_input_order() {
        let agents = builtin_agents();
        let views = resolve(PlanTier::Free.definition(), &agents);
        let ids: Vec<_> = views.iter().map(|v| v.agent.id.as_str()).collect();
        assert_eq!(ids, ["coach", "redator", "dev", "terapeuta", "estrategista"]);
    }

    #[test]
    fn history_tristate_is_truthy_when_not_off() {
        assert!(!has_feature(PlanTier::Free.definition(), Feature::History));
        assert!(has_feature(PlanTier::Plus.definition(), Feature::History));
        assert!(has_feature(PlanTier::Pro.definition(), Feature::History));
    }

    #[test]
    fn voice_requires_pro_or_higher() {
        assert!(!has_feature(PlanTier::Plus.definition(), Feature::Voice));
        assert!(has_feature(PlanTier::Pro.definition(), Feature::Voice));
        assert!(has_feature(PlanTier::Interplase.definition(), Feature::Voice));
    }
}
