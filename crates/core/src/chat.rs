//! Chat log mutation and the deferred canned reply.

use crate::clock::Clock;
use crate::models::{ChatRole, TrainingPhase};
use crate::store::Store;
use providers::{ChatProvider, ProviderRegistry};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("model training has not completed")]
    ModelNotReady,
    #[error("message is empty")]
    EmptyMessage,
}

/// Look up a chat provider and produce a reply for one message.
pub async fn respond(registry: &ProviderRegistry, message: &str) -> anyhow::Result<String> {
    let provider = registry.chat(None)?;
    Ok(provider.reply(message).await?)
}

pub struct ChatService {
    store: Store,
    provider: Arc<dyn ChatProvider>,
    clock: Arc<dyn Clock>,
    reply_delay: Duration,
}

impl ChatService {
    pub fn new(
        store: Store,
        provider: Arc<dyn ChatProvider>,
        clock: Arc<dyn Clock>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            clock,
            reply_delay,
        }
    }

    /// Append the user's message and schedule the assistant reply after the
    /// configured delay. The returned handle is the deferred reply task; it
    /// always fires once scheduled and may be dropped by callers that do not
    /// care when delivery happens.
    pub fn send(&self, text: &str) -> Result<JoinHandle<()>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.store.training_status().phase != TrainingPhase::Completed {
            return Err(ChatError::ModelNotReady);
        }

        self.store.push_chat_message(ChatRole::User, text);

        let store = self.store.clone();
        let provider = self.provider.clone();
        let clock = self.clock.clone();
        let delay = self.reply_delay;
        let prompt = text.to_string();
        Ok(tokio::spawn(async move {
            clock.sleep(delay).await;
            match provider.reply(&prompt).await {
                Ok(reply) => {
                    store.push_chat_message(ChatRole::Assistant, reply);
                }
                Err(err) => warn!(error = %err, "chat provider failed to reply"),
            }
        }))
    }

    pub fn clear(&self) {
        self.store.clear_chat_messages();
    }
}
