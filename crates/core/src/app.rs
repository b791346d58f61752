//! Wires config, providers, and services into a running application.

use crate::chat::ChatService;
use crate::clock::{Clock, TokioClock};
use crate::config::AppConfig;
use crate::rules;
use crate::store::Store;
use crate::trainer::Trainer;
use providers::canned::{self, CannedProvider};
use providers::noop::NoopProvider;
use providers::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    let mut reg = ProviderRegistry::new().with_chat("noop", Arc::new(NoopProvider));

    let mut reply_rules = canned::default_rules();
    if let Some(dir) = &config.replies.path {
        match rules::load_reply_rules_from_dir(&std::path::PathBuf::from(dir)) {
            Ok(custom) if !custom.is_empty() => reply_rules = custom,
            Ok(_) => {}
            Err(err) => warn!(error = %err, "failed to load reply rules, using defaults"),
        }
    }
    reg = reg.with_chat(
        "canned",
        Arc::new(CannedProvider::new(reply_rules, canned::DEFAULT_REPLY)),
    );

    reg.set_preferred_chat(&config.chat.provider)
}

/// One running application: the shared store plus the services around it.
pub struct App {
    pub store: Store,
    registry: ProviderRegistry,
    config: AppConfig,
    clock: Arc<dyn Clock>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(TokioClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let registry = build_registry(&config);
        Self {
            store: Store::new(),
            registry,
            config,
            clock,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn trainer(&self) -> Trainer {
        Trainer::new(
            self.store.clone(),
            self.clock.clone(),
            Duration::from_millis(self.config.training.tick_ms),
        )
    }

    pub fn chat(&self) -> anyhow::Result<ChatService> {
        let provider = self.registry.chat(None)?;
        Ok(ChatService::new(
            self.store.clone(),
            provider,
            self.clock.clone(),
            Duration::from_millis(self.config.chat.reply_delay_ms),
        ))
    }
}
