//! Template reply generator.
//!
//! The deterministic stand-in for a real inference backend: it greets the
//! user as the selected agent, quotes a prefix of the agent's instructions
//! and a prefix of the user's text. Substituting a real backend means
//! implementing [`ReplyGenerator`] elsewhere; the session machinery does
//! not change.

use chatpro_application::ReplyGenerator;
use chatpro_domain::{util::truncate_str, Agent};

const PROMPT_PREVIEW_BYTES: usize = 50;
const TEXT_PREVIEW_BYTES: usize = 30;

pub struct TemplateReplyGenerator;

impl ReplyGenerator for TemplateReplyGenerator {
    fn generate_reply(&self, agent: &Agent, user_text: &str) -> String {
        let mut reply = format!("Olá! Sou {}. ", agent.name);
        if agent.prompt_base.is_empty() {
            reply.push_str(&format!(
                "Como {} posso te ajudar com: \"{}...\"?",
                agent.name,
                truncate_str(user_text, TEXT_PREVIEW_BYTES)
            ));
        } else {
            reply.push_str(&format!(
                "Seguindo minhas instruções: \"{}...\", como posso te ajudar com: \"{}...\"?",
                truncate_str(&agent.prompt_base, PROMPT_PREVIEW_BYTES),
                truncate_str(user_text, TEXT_PREVIEW_BYTES)
            ));
        }
        reply
    }
}
