//! Agent entities.

use crate::agent::value_objects::AgentId;
use serde::{Deserialize, Serialize};

/// Ids reserved by the built-in personas. A custom agent may never be
/// created or loaded under one of these.
pub const BUILTIN_IDS: [&str; 5] = ["coach", "redator", "dev", "terapeuta", "estrategista"];

/// Whether the given id belongs to a built-in agent.
pub fn is_builtin_id(id: &AgentId) -> bool {
    BUILTIN_IDS.contains(&id.as_str())
}

/// A chat persona (Entity).
///
/// Built-in agents exist for the process lifetime and are immutable;
/// custom agents are created, updated and deleted through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub avatar: String,
    pub description: String,
    pub prompt_base: String,
    pub is_custom: bool,
}

impl Agent {
    /// Build a custom agent from user-supplied fields under a given id.
    pub fn custom(id: AgentId, draft: AgentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            avatar: draft.avatar,
            description: draft.description,
            prompt_base: draft.prompt_base,
            is_custom: true,
        }
    }

    fn builtin(id: &str, name: &str, avatar: &str, description: &str, prompt_base: &str) -> Self {
        Self {
            id: AgentId::new(id),
            name: name.to_string(),
            avatar: avatar.to_string(),
            description: description.to_string(),
            prompt_base: prompt_base.to_string(),
            is_custom: false,
        }
    }
}

/// User-supplied fields of a custom agent, used for create and update.
///
/// Input validation (non-empty name/avatar) is a caller concern; the
/// registry accepts any well-formed draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: String,
    pub avatar: String,
    pub description: String,
    pub prompt_base: String,
}

/// Partial update of a custom agent: only the present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub prompt_base: Option<String>,
}

impl AgentPatch {
    pub fn apply(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name = name.clone();
        }
        if let Some(avatar) = &self.avatar {
            agent.avatar = avatar.clone();
        }
        if let Some(description) = &self.description {
            agent.description = description.clone();
        }
        if let Some(prompt_base) = &self.prompt_base {
            agent.prompt_base = prompt_base.clone();
        }
    }
}

/// The fixed built-in personas, in their canonical display order.
pub fn builtin_agents() -> Vec<Agent> {
    vec![
        Agent::builtin(
            "coach",
            "Coach",
            "🧠",
            "Seu coach pessoal para metas e desenvolvimento.",
            "Você é um coach motivacional e experiente. Ajude o usuário a definir metas claras \
             e a superar obstáculos com conselhos práticos e encorajadores.",
        ),
        Agent::builtin(
            "redator",
            "Redator",
            "✍️",
            "Assistente de escrita criativa e profissional.",
            "Você é um redator publicitário e de conteúdo altamente criativo. Ajude o usuário a \
             criar textos persuasivos, originais e gramaticalmente corretos para diversas \
             finalidades.",
        ),
        Agent::builtin(
            "dev",
            "Dev",
            "💻",
            "Auxiliar de desenvolvimento de software.",
            "Você é um desenvolvedor sênior full-stack. Forneça explicações claras sobre \
             conceitos de programação, ajude a depurar código e sugira as melhores práticas de \
             desenvolvimento.",
        ),
        Agent::builtin(
            "terapeuta",
            "Terapeuta",
            "❤️",
            "Apoio emocional e bem-estar.",
            "Você é um terapeuta compassivo e atencioso. Ofereça um espaço seguro para o \
             usuário expressar seus sentimentos, valide suas emoções e sugira técnicas de \
             coping e bem-estar. Lembre-se que você não substitui um profissional de saúde \
             mental.",
        ),
        Agent::builtin(
            "estrategista",
            "Estrategista",
            "📈",
            "Consultor para negócios e planejamento.",
            "Você é um estrategista de negócios experiente. Ajude o usuário a analisar \
             cenários, desenvolver planos de negócios, identificar oportunidades e tomar \
             decisões estratégicas informadas.",
        ),
    ]
}
