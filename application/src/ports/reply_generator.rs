//! Reply generator port
//!
//! The "AI" behind the chat is pluggable: the session controller only ever
//! asks this port for reply text. The shipped adapter is a deterministic
//! template stub; a real inference backend can be substituted without
//! touching the session state machinery.

use chatpro_domain::Agent;

/// Produces the assistant's reply to a user message.
pub trait ReplyGenerator: Send + Sync {
    /// Synthesize a reply from the selected agent and the user's text.
    fn generate_reply(&self, agent: &Agent, user_text: &str) -> String;
}
