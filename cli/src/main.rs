//! CLI entrypoint for ChatPro
//!
//! Wires the layers together with dependency injection and hands control
//! to the line-oriented chat REPL. The REPL stands in for the real
//! presentation layer: it feeds raw text into the engine and renders the
//! message log and errors it gets back.

mod repl;

use anyhow::Result;
use chatpro_application::{
    AgentRegistry, ChatSession, IdentityProvider, KeyValueStore, PlanState, QuotaTracker,
};
use chatpro_infrastructure::{
    ConfigLoader, FixedIdentity, JsonFileStore, MemoryStore, SystemClock, TemplateReplyGenerator,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatpro", about = "Chat with plan-gated agents", version)]
struct Cli {
    /// Path to a config file (merged over chatpro.toml and the global config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep all state in memory (nothing is persisted)
    #[arg(long)]
    ephemeral: bool,

    /// Override the configured user id
    #[arg(long)]
    user: Option<String>,

    /// Switch to this plan tier before starting (FREE, PLUS, PRO, INTERPLASE)
    #[arg(long)]
    plan: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?;

    // === Dependency Injection ===
    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let path = config
            .store
            .path
            .clone()
            .unwrap_or_else(ConfigLoader::default_store_path);
        info!("Persisting to {}", path.display());
        Arc::new(JsonFileStore::open(path))
    };

    let plan = Arc::new(PlanState::load(store.clone()));
    if let Some(name) = &cli.plan {
        plan.set_plan_by_name(name)?;
    }

    let registry = Arc::new(AgentRegistry::load(store.clone()));
    let quota = Arc::new(QuotaTracker::new(store, Arc::new(SystemClock)));
    let identity: Arc<dyn IdentityProvider> = Arc::new(FixedIdentity::new(
        cli.user.unwrap_or_else(|| config.user.id.clone()),
    ));

    let (session, events) = ChatSession::new(
        plan.clone(),
        registry.clone(),
        quota,
        identity,
        Arc::new(TemplateReplyGenerator),
        config.session_params(),
    );

    info!("Starting ChatPro ({} plan)", plan.tier());

    repl::Repl::new(session, events, plan, registry).run().await
}
