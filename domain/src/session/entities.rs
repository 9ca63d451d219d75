//! Session entities.

use crate::agent::entities::Agent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Ai,
    System,
}

/// Non-text payload attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePayload {
    /// A rendered image preview (simulated generation result).
    ImagePreview { url: String, alt: String },
}

/// A message in a conversation (Entity).
///
/// The log is append-only within a session; it is cleared wholesale on
/// "new chat" and on agent switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the agent that produced an `Ai` message.
    pub agent: Option<Agent>,
    pub payload: Option<MessagePayload>,
}

impl Message {
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, Sender::User)
    }

    pub fn ai(id: impl Into<String>, text: impl Into<String>, agent: Agent) -> Self {
        let mut message = Self::new(id, text, Sender::Ai);
        message.agent = Some(agent);
        message
    }

    pub fn system(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, Sender::System)
    }

    pub fn with_payload(mut self, payload: MessagePayload) -> Self {
        self.payload = Some(payload);
        self
    }

    fn new(id: impl Into<String>, text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            agent: None,
            payload: None,
        }
    }
}

/// Coarse lifecycle state of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No agent selected yet.
    Idle,
    /// Agent selected, ready to accept a message.
    Ready,
    /// A user action was accepted and the synthetic reply is pending.
    AwaitingReply,
}
