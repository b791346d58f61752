//! Provider abstractions for chat responders.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod canned;
pub mod noop;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not implemented")]
    NotImplemented,
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, ProviderError>;
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    chat: HashMap<String, Arc<dyn ChatProvider>>,
    pub preferred_chat: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(mut self, name: &str, provider: Arc<dyn ChatProvider>) -> Self {
        self.chat.insert(name.to_string(), provider);
        self
    }

    pub fn set_preferred_chat(mut self, name: &str) -> Self {
        self.preferred_chat = Some(name.to_string());
        self
    }

    pub fn chat(&self, name: Option<&str>) -> Result<Arc<dyn ChatProvider>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred_chat.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no chat provider configured".into()))?;
        self.chat
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider(key))
    }
}
