//! Line-oriented chat REPL.
//!
//! Pumps two sources through one `select!` loop: stdin lines (commands and
//! chat text) and the session's deferred events (replies, voice captures).
//! Rendering is deliberately plain — the engine is the product here, the
//! REPL is its harness.

use anyhow::Result;
use chatpro_application::{AgentRegistry, ChatSession, PlanState, SessionEvent};
use chatpro_domain::{AgentDraft, AgentId, DomainError, Sender, SessionState};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub struct Repl {
    session: ChatSession,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    plan: Arc<PlanState>,
    registry: Arc<AgentRegistry>,
    /// Messages already rendered; everything past this index is new.
    rendered: usize,
}

impl Repl {
    pub fn new(
        session: ChatSession,
        events: mpsc::UnboundedReceiver<SessionEvent>,
        plan: Arc<PlanState>,
        registry: Arc<AgentRegistry>,
    ) -> Self {
        Self {
            session,
            events,
            plan,
            registry,
            rendered: 0,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("ChatPro — plano {}", self.plan.definition().display_name);
        if let Some(id) = self.session.select_first_available() {
            println!("Conversando com '{}'. /help para comandos.", id);
        } else {
            println!("Nenhum agente disponível no seu plano. /help para comandos.");
        }
        self.render_new();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print_prompt(self.session.state());
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle_line(line.trim()) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                Some(event) = self.events.recv() => {
                    if let Err(e) = self.session.apply(event) {
                        self.notice(&e);
                    }
                }
            }
            self.render_new();
        }
        Ok(())
    }

    /// Returns false when the REPL should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }
        if !line.starts_with('/') {
            if let Err(e) = self.session.send_message(line) {
                self.notice(&e);
            }
            return true;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" => return false,
            "/help" => self.help(),
            "/agents" => self.list_agents(),
            "/select" => {
                match self.session.select_agent(&AgentId::new(rest)) {
                    Ok(()) => {
                        self.rendered = 0;
                        println!("Agora conversando com '{}'.", rest);
                    }
                    Err(e) => self.notice(&e),
                }
            }
            "/new" => {
                self.session.new_chat();
                self.rendered = 0;
                println!("A conversa foi reiniciada.");
            }
            "/plan" => self.handle_plan(rest),
            "/quota" => {
                let (count, quota) = self.session.quota_status();
                println!("Mensagens hoje: {}/{}", count, quota);
            }
            "/create" => self.create_agent(rest),
            "/delete" => {
                if self.registry.delete(&AgentId::new(rest)) {
                    println!("Agente removido.");
                } else {
                    println!("Nada removido (id desconhecido ou agente padrão).");
                }
            }
            "/image" => {
                if let Err(e) = self.session.generate_image(rest) {
                    self.notice(&e);
                }
            }
            "/voice" => {
                if let Err(e) = self.session.voice_input() {
                    self.notice(&e);
                }
            }
            other => println!("Comando desconhecido: {}", other),
        }
        true
    }

    fn handle_plan(&mut self, arg: &str) {
        match arg {
            "" => {
                let plan = self.plan.definition();
                println!(
                    "Plano atual: {} ({} mensagens/dia)",
                    plan.display_name, plan.max_messages_per_day
                );
            }
            "cycle" => {
                let tier = self.plan.cycle_plan();
                println!("Plano alterado para {}.", tier.definition().display_name);
            }
            name => match self.plan.set_plan_by_name(name) {
                Ok(tier) => println!("Plano alterado para {}.", tier.definition().display_name),
                Err(e) => self.notice(&e),
            },
        }
    }

    fn create_agent(&mut self, input: &str) {
        // /create Nome | 🤖 | descrição | prompt base
        let mut parts = input.splitn(4, '|').map(str::trim);
        let name = parts.next().unwrap_or("").to_string();
        if name.is_empty() {
            println!("Uso: /create nome | avatar | descrição | prompt");
            return;
        }
        let draft = AgentDraft {
            name,
            avatar: parts.next().unwrap_or("🤖").to_string(),
            description: parts.next().unwrap_or("").to_string(),
            prompt_base: parts.next().unwrap_or("").to_string(),
        };
        match self.registry.create(draft, self.plan.definition()) {
            Ok(agent) => println!("Agente '{}' criado ({}).", agent.name, agent.id),
            Err(e) => self.notice(&e),
        }
    }

    fn list_agents(&self) {
        for view in self.session.effective_agents() {
            let marker = if view.unavailable { "🔒" } else { " " };
            let kind = if view.agent.is_custom { "custom" } else { "padrão" };
            println!(
                "{} {} {} [{}] — {}",
                marker, view.agent.avatar, view.agent.id, kind, view.agent.description
            );
        }
    }

    fn render_new(&mut self) {
        let messages = self.session.messages();
        for message in &messages[self.rendered.min(messages.len())..] {
            let who = match message.sender {
                Sender::User => "você".to_string(),
                Sender::Ai => message
                    .agent
                    .as_ref()
                    .map(|a| format!("{} {}", a.avatar, a.name))
                    .unwrap_or_else(|| "ia".to_string()),
                Sender::System => "sistema".to_string(),
            };
            println!("[{}] {}", who, message.text);
        }
        self.rendered = messages.len();
    }

    fn notice(&self, error: &DomainError) {
        println!("⚠ {}", error);
    }

    fn help(&self) {
        println!("Comandos:");
        println!("  texto            envia uma mensagem ao agente atual");
        println!("  /agents          lista agentes e disponibilidade");
        println!("  /select <id>     troca de agente (limpa a conversa)");
        println!("  /new             reinicia a conversa");
        println!("  /plan [nome]     mostra ou troca o plano; /plan cycle avança");
        println!("  /quota           mostra o uso diário de mensagens");
        println!("  /create a|b|c|d  cria um agente custom (nome|avatar|descrição|prompt)");
        println!("  /delete <id>     remove um agente custom");
        println!("  /image [prompt]  simula geração de imagem");
        println!("  /voice           simula entrada de voz");
        println!("  /quit            sai");
    }
}

fn print_prompt(state: SessionState) {
    if state == SessionState::AwaitingReply {
        println!("(digitando...)");
    }
}
