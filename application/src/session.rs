//! Chat session controller.
//!
//! Orchestrates one conversation: the selected agent, the message log, and
//! the typing lifecycle. Entitlement and quota checks run synchronously
//! before any mutation, so a denial never leaves the session half-mutated.
//!
//! The only suspension point is the simulated reply delay. It is modeled as
//! a spawned task guarded by a [`CancellationToken`] and an epoch counter:
//! any state-invalidating action (agent switch, new chat) cancels the token
//! and bumps the epoch, and [`ChatSession::apply`] discards events whose
//! epoch is stale. The owner of the session pumps the event receiver back
//! into `apply`.

use crate::config::SessionParams;
use crate::plan_state::PlanState;
use crate::ports::identity::IdentityProvider;
use crate::ports::reply_generator::ReplyGenerator;
use crate::quota::QuotaTracker;
use crate::registry::AgentRegistry;
use chatpro_domain::{
    entitlement, util::truncate_str, Agent, AgentId, DomainError, EffectiveAgent, Feature,
    Message, MessagePayload, MessageQuota, SessionState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Transcription produced by the simulated voice capture.
const SIMULATED_SPEECH: &str = "Olá, este é um texto simulado falado.";

/// Prompt used when the user asks for an image without typing one.
const DEFAULT_IMAGE_PROMPT: &str = "um gato cyberpunk em uma cidade chuvosa de neon";

/// Deferred outcome of an accepted session action.
///
/// Events carry the epoch of the session that scheduled them; a stale epoch
/// means the session moved on and the event must be discarded.
#[derive(Debug)]
pub enum SessionEvent {
    /// The synthetic reply (or image preview) is ready to append.
    ReplyReady { epoch: u64, message: Message },
    /// The simulated voice capture finished; feed the text through the
    /// normal send path.
    VoiceCaptured { epoch: u64, text: String },
}

impl SessionEvent {
    fn epoch(&self) -> u64 {
        match self {
            SessionEvent::ReplyReady { epoch, .. } => *epoch,
            SessionEvent::VoiceCaptured { epoch, .. } => *epoch,
        }
    }
}

/// Controller for one active conversation.
pub struct ChatSession {
    plan: Arc<PlanState>,
    registry: Arc<AgentRegistry>,
    quota: Arc<QuotaTracker>,
    identity: Arc<dyn IdentityProvider>,
    reply: Arc<dyn ReplyGenerator>,
    params: SessionParams,
    tx: mpsc::UnboundedSender<SessionEvent>,
    state: SessionState,
    agent: Option<Agent>,
    messages: Vec<Message>,
    /// Bumped by every state-invalidating action; stale events are dropped.
    epoch: u64,
    pending: Option<CancellationToken>,
    message_seq: u64,
}

impl ChatSession {
    /// Build a session over the shared engine state.
    ///
    /// Returns the controller and the receiver the owner must pump back
    /// into [`ChatSession::apply`].
    pub fn new(
        plan: Arc<PlanState>,
        registry: Arc<AgentRegistry>,
        quota: Arc<QuotaTracker>,
        identity: Arc<dyn IdentityProvider>,
        reply: Arc<dyn ReplyGenerator>,
        params: SessionParams,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            plan,
            registry,
            quota,
            identity,
            reply,
            params,
            tx,
            state: SessionState::Idle,
            agent: None,
            messages: Vec::new(),
            epoch: 0,
            pending: None,
            message_seq: 0,
        };
        (session, rx)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Agents with availability resolved under the active plan.
    pub fn effective_agents(&self) -> Vec<EffectiveAgent> {
        entitlement::resolve(self.plan.definition(), &self.registry.list())
    }

    /// Today's message count and the active plan's allowance.
    pub fn quota_status(&self) -> (u32, MessageQuota) {
        let count = self.quota.count_today(&self.identity.user_id());
        (count, self.plan.definition().max_messages_per_day)
    }

    /// Select an agent and start a fresh conversation with it.
    ///
    /// Fails with [`DomainError::AgentUnavailable`] when the agent does not
    /// exist or the active plan does not grant it; nothing changes then.
    pub fn select_agent(&mut self, id: &AgentId) -> Result<(), DomainError> {
        let view = self
            .effective_agents()
            .into_iter()
            .find(|v| &v.agent.id == id)
            .ok_or_else(|| DomainError::AgentUnavailable(id.to_string()))?;
        if view.unavailable {
            return Err(DomainError::AgentUnavailable(id.to_string()));
        }

        self.invalidate_pending();
        self.messages.clear();
        debug!("Selected agent '{}'", view.agent.id);
        self.agent = Some(view.agent);
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Select the first agent the active plan makes available, if any.
    pub fn select_first_available(&mut self) -> Option<AgentId> {
        let id = self
            .effective_agents()
            .into_iter()
            .find(EffectiveAgent::is_available)
            .map(|v| v.agent.id)?;
        self.select_agent(&id).ok()?;
        Some(id)
    }

    /// Accept a user message and schedule the reply.
    ///
    /// Returns `Ok(false)` without any effect when the text is blank or the
    /// session is not `Ready`. Returns [`DomainError::QuotaExceeded`] with
    /// no mutation when the daily limit is reached.
    pub fn send_message(&mut self, text: &str) -> Result<bool, DomainError> {
        let text = text.trim();
        if text.is_empty() || self.state != SessionState::Ready {
            return Ok(false);
        }
        let agent = self.agent.clone().expect("Ready state implies an agent");

        let plan = self.plan.definition();
        let user_id = self.identity.user_id();
        if self.quota.is_exhausted_today(&user_id, plan) {
            return Err(DomainError::QuotaExceeded {
                limit: plan.max_messages_per_day.limit().unwrap_or(0),
            });
        }

        let id = self.next_message_id();
        self.messages.push(Message::user(id, text));

        // Unlimited plans never increment, to keep counters bounded
        if !plan.max_messages_per_day.is_unlimited() {
            self.quota.increment_today(&user_id);
        }

        let reply_text = self.reply.generate_reply(&agent, text);
        let reply_id = self.next_message_id();
        let delay = jittered(self.params.reply_delay_min, self.params.reply_delay_max);
        self.state = SessionState::AwaitingReply;
        self.schedule(delay, move |epoch| SessionEvent::ReplyReady {
            epoch,
            message: Message::ai(reply_id, reply_text, agent),
        });
        Ok(true)
    }

    /// Simulate image generation, gated on the plan's imageGeneration flag.
    ///
    /// Appends a `system` status message and, after the delay, an `ai`
    /// message carrying the preview payload. Does not consume message
    /// quota.
    pub fn generate_image(&mut self, prompt: &str) -> Result<bool, DomainError> {
        if !self.plan.has_feature(Feature::ImageGeneration) {
            return Err(DomainError::FeatureLocked(Feature::ImageGeneration));
        }
        if self.state != SessionState::Ready {
            return Ok(false);
        }
        let agent = self.agent.clone().expect("Ready state implies an agent");

        let prompt = match prompt.trim() {
            "" => DEFAULT_IMAGE_PROMPT,
            p => p,
        }
        .to_string();

        let status_id = self.next_message_id();
        self.messages.push(Message::system(
            status_id,
            format!("Gerando imagem com prompt: \"{}\"", prompt),
        ));

        let preview_id = self.next_message_id();
        let delay = self.params.image_delay;
        self.state = SessionState::AwaitingReply;
        self.schedule(delay, move |epoch| {
            let alt = format!("Prévia de imagem gerada por IA: {}", prompt);
            let url = format!(
                "https://dummyimage.com/400x300/7d28e7/fff.png&text=Prévia+IA:+{}...",
                truncate_str(&prompt, 20)
            );
            SessionEvent::ReplyReady {
                epoch,
                message: Message::ai(preview_id, alt.clone(), agent)
                    .with_payload(MessagePayload::ImagePreview { url, alt }),
            }
        });
        Ok(true)
    }

    /// Simulate voice input, gated on the plan's voice flag.
    ///
    /// Appends a `system` "listening" message; after the delay the captured
    /// transcription is fed through [`ChatSession::send_message`], so it is
    /// subject to the normal quota check.
    pub fn voice_input(&mut self) -> Result<bool, DomainError> {
        if !self.plan.has_feature(Feature::Voice) {
            return Err(DomainError::FeatureLocked(Feature::Voice));
        }
        if self.state != SessionState::Ready {
            return Ok(false);
        }

        let status_id = self.next_message_id();
        self.messages.push(Message::system(status_id, "Ouvindo..."));

        let delay = self.params.voice_delay;
        self.state = SessionState::AwaitingReply;
        self.schedule(delay, move |epoch| SessionEvent::VoiceCaptured {
            epoch,
            text: SIMULATED_SPEECH.to_string(),
        });
        Ok(true)
    }

    /// Clear the conversation, keeping the selected agent.
    ///
    /// Cancels any pending reply; a reply scheduled before this call will
    /// never be appended.
    pub fn new_chat(&mut self) {
        self.invalidate_pending();
        self.messages.clear();
        self.state = match self.agent {
            Some(_) => SessionState::Ready,
            None => SessionState::Idle,
        };
    }

    /// Feed a scheduled event back into the session.
    ///
    /// Events from a superseded epoch are discarded silently — their
    /// session no longer exists.
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), DomainError> {
        if event.epoch() != self.epoch {
            debug!("Discarding stale session event");
            return Ok(());
        }
        self.pending = None;

        match event {
            SessionEvent::ReplyReady { message, .. } => {
                self.messages.push(message);
                self.state = SessionState::Ready;
                Ok(())
            }
            SessionEvent::VoiceCaptured { text, .. } => {
                self.state = SessionState::Ready;
                self.send_message(&text).map(|_| ())
            }
        }
    }

    fn invalidate_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        self.epoch += 1;
    }

    /// Spawn the cancellable timer for a deferred event.
    fn schedule(
        &mut self,
        delay: Duration,
        make_event: impl FnOnce(u64) -> SessionEvent + Send + 'static,
    ) {
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let tx = self.tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(make_event(epoch));
                }
            }
        });
    }

    fn next_message_id(&mut self) -> String {
        self.message_seq += 1;
        format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            self.message_seq
        )
    }
}

/// Pick a delay inside `[min, max]` with clock-derived jitter.
///
/// The exact distribution is not load-bearing; anything bounded works.
fn jittered(min: Duration, max: Duration) -> Duration {
    let span = max.saturating_sub(min);
    if span.is_zero() {
        return min;
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos() as u128;
    min + Duration::from_nanos((nanos % (span.as_nanos() + 1)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::identity::AnonymousIdentity;
    use crate::test_support::{EchoReply, FixedClock, MapStore};
    use chatpro_domain::{PlanTier, Sender};

    fn engine(tier: PlanTier) -> (ChatSession, mpsc::UnboundedReceiver<SessionEvent>) {
        let store = MapStore::new();
        let plan = Arc::new(PlanState::load(store.clone()));
        plan.set_plan(tier);
        let registry = Arc::new(AgentRegistry::load(store.clone()));
        let quota = Arc::new(QuotaTracker::new(store, FixedClock::at(2025, 3, 9)));
        ChatSession::new(
            plan,
            registry,
            quota,
            Arc::new(AnonymousIdentity),
            Arc::new(EchoReply),
            SessionParams::immediate(),
        )
    }

    /// Drain every event currently flowing through the channel into the
    /// session, yielding so spawned timers get to run first.
    async fn pump(
        session: &mut ChatSession,
        rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Result<(), DomainError> {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        while let Ok(event) = rx.try_recv() {
            session.apply(event)?;
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
        }
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn send_is_a_noop_before_agent_selection() {
        let (mut session, _rx) = engine(PlanTier::Free);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.send_message("olá").unwrap());
        assert!(session.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_user_message_then_reply() {
        let (mut session, mut rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();

        assert!(session.send_message("  preciso de foco  ").unwrap());
        assert_eq!(session.state(), SessionState::AwaitingReply);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::User);
        assert_eq!(session.messages()[0].text, "preciso de foco");

        pump(&mut session, &mut rx).await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.messages().len(), 2);
        let reply = &session.messages()[1];
        assert_eq!(reply.sender, Sender::Ai);
        assert_eq!(reply.text, "Coach: preciso de foco");
        assert_eq!(reply.agent.as_ref().unwrap().id, AgentId::new("coach"));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_text_is_ignored() {
        let (mut session, _rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();
        assert!(!session.send_message("   ").unwrap());
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn free_plan_exhausts_after_ten_messages() {
        let (mut session, mut rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();

        for n in 1..=10 {
            assert!(session.send_message(&format!("mensagem {}", n)).unwrap());
            pump(&mut session, &mut rx).await.unwrap();
        }
        let (count, _) = session.quota_status();
        assert_eq!(count, 10);

        let err = session.send_message("mais uma").unwrap_err();
        assert_eq!(err, DomainError::QuotaExceeded { limit: 10 });
        // Denied: no message appended, no increment, still Ready
        assert_eq!(session.messages().len(), 20);
        assert_eq!(session.quota_status().0, 10);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn unlimited_plans_never_increment_the_counter() {
        let (mut session, mut rx) = engine(PlanTier::Pro);
        session.select_agent(&AgentId::new("coach")).unwrap();
        for _ in 0..3 {
            session.send_message("oi").unwrap();
            pump(&mut session, &mut rx).await.unwrap();
        }
        assert_eq!(session.quota_status().0, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_agent_selection_is_denied() {
        let (mut session, _rx) = engine(PlanTier::Free);
        let err = session.select_agent(&AgentId::new("redator")).unwrap_err();
        assert_eq!(err, DomainError::AgentUnavailable("redator".to_string()));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn plan_upgrade_unlocks_agent_and_clears_log() {
        let (mut session, mut rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();
        session.send_message("oi").unwrap();
        pump(&mut session, &mut rx).await.unwrap();
        assert_eq!(session.messages().len(), 2);

        assert!(session.select_agent(&AgentId::new("redator")).is_err());

        session.plan.set_plan(PlanTier::Plus);
        session.select_agent(&AgentId::new("redator")).unwrap();
        assert!(session.messages().is_empty());
        assert_eq!(
            session.current_agent().unwrap().id,
            AgentId::new("redator")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn select_first_available_prefers_plan_order() {
        let (mut session, _rx) = engine(PlanTier::Free);
        assert_eq!(session.select_first_available(), Some(AgentId::new("coach")));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn new_chat_cancels_the_pending_reply() {
        let (mut session, mut rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();
        session.send_message("oi").unwrap();
        assert_eq!(session.state(), SessionState::AwaitingReply);

        session.new_chat();
        assert_eq!(session.state(), SessionState::Ready);

        // Whether or not the timer already fired, no reply may surface in
        // the fresh conversation.
        pump(&mut session, &mut rx).await.unwrap();
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn agent_switch_discards_the_in_flight_reply() {
        let (mut session, mut rx) = engine(PlanTier::Plus);
        session.select_agent(&AgentId::new("coach")).unwrap();
        session.send_message("oi").unwrap();

        session.select_agent(&AgentId::new("redator")).unwrap();
        pump(&mut session, &mut rx).await.unwrap();
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn image_generation_is_feature_gated() {
        let (mut session, _rx) = engine(PlanTier::Free);
        session.select_agent(&AgentId::new("coach")).unwrap();
        let err = session.generate_image("um dragão").unwrap_err();
        assert_eq!(err, DomainError::FeatureLocked(Feature::ImageGeneration));
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn image_generation_appends_status_then_preview() {
        let (mut session, mut rx) = engine(PlanTier::Plus);
        session.select_agent(&AgentId::new("coach")).unwrap();
        assert!(session.generate_image("um dragão").unwrap());
        assert_eq!(session.messages()[0].sender, Sender::System);

        pump(&mut session, &mut rx).await.unwrap();
        assert_eq!(session.messages().len(), 2);
        let preview = &session.messages()[1];
        assert_eq!(preview.sender, Sender::Ai);
        match preview.payload.as_ref().unwrap() {
            MessagePayload::ImagePreview { url, alt } => {
                assert!(url.contains("um+dragão") || url.contains("um dragão"));
                assert!(alt.contains("um dragão"));
            }
        }
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_image_prompt_uses_the_default() {
        let (mut session, mut rx) = engine(PlanTier::Plus);
        session.select_agent(&AgentId::new("coach")).unwrap();
        session.generate_image("   ").unwrap();
        pump(&mut session, &mut rx).await.unwrap();
        assert!(session.messages()[0].text.contains(DEFAULT_IMAGE_PROMPT));
    }

    #[tokio::test(start_paused = true)]
    async fn voice_input_requires_pro() {
        let (mut session, _rx) = engine(PlanTier::Plus);
        session.select_agent(&AgentId::new("coach")).unwrap();
        let err = session.voice_input().unwrap_err();
        assert_eq!(err, DomainError::FeatureLocked(Feature::Voice));
    }

    #[tokio::test(start_paused = true)]
    async fn voice_input_feeds_the_send_path() {
        let (mut session, mut rx) = engine(PlanTier::Pro);
        session.select_agent(&AgentId::new("coach")).unwrap();
        assert!(session.voice_input().unwrap());
        assert_eq!(session.messages()[0].text, "Ouvindo...");

        pump(&mut session, &mut rx).await.unwrap();
        // system status + transcribed user message + reply
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages()[1].text, SIMULATED_SPEECH);
        assert_eq!(session.messages()[2].sender, Sender::Ai);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_agents_are_usable_on_free() {
        let (mut session, mut rx) = engine(PlanTier::Free);
        let created = session
            .registry
            .create(
                chatpro_domain::AgentDraft {
                    name: "Sommelier".to_string(),
                    avatar: "🍷".to_string(),
                    description: String::new(),
                    prompt_base: String::new(),
                },
                PlanTier::Free.definition(),
            )
            .unwrap();
        session.select_agent(&created.id).unwrap();
        session.send_message("oi").unwrap();
        pump(&mut session, &mut rx).await.unwrap();
        assert_eq!(session.messages().len(), 2);
    }
}
