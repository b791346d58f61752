//! Process-wide application state behind a single shared handle.
//!
//! Every mutation runs to completion under the lock, so chat messages keep
//! their append order and training updates land last-write-wins.

use crate::models::{
    ChatMessage, ChatRole, EmailSource, FolderSource, ModelFile, TrainingStatus, TrainingUpdate,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

pub const FOLDER_SOURCE_CAP: usize = 3;

#[derive(Debug, Default)]
struct AppState {
    email_sources: Vec<EmailSource>,
    folder_sources: Vec<FolderSource>,
    model_file: Option<ModelFile>,
    training: TrainingStatus,
    chat_log: Vec<ChatMessage>,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_email_source(&self, source: EmailSource) {
        self.lock().email_sources.push(source);
    }

    pub fn remove_email_source(&self, id: Uuid) {
        self.lock().email_sources.retain(|s| s.id != id);
    }

    /// No-op once the cap is reached; the selection view shows the count.
    pub fn add_folder_source(&self, source: FolderSource) {
        let mut state = self.lock();
        if state.folder_sources.len() < FOLDER_SOURCE_CAP {
            state.folder_sources.push(source);
        } else {
            debug!(name = %source.name, "folder cap reached, selection ignored");
        }
    }

    pub fn remove_folder_source(&self, id: Uuid) {
        self.lock().folder_sources.retain(|s| s.id != id);
    }

    pub fn set_model_file(&self, file: Option<ModelFile>) {
        self.lock().model_file = file;
    }

    pub fn update_training(&self, update: TrainingUpdate) {
        let mut state = self.lock();
        if let Some(phase) = update.phase {
            state.training.phase = phase;
        }
        if let Some(progress) = update.progress {
            state.training.progress = progress;
        }
        if let Some(message) = update.message {
            state.training.message = message;
        }
    }

    pub fn push_chat_message(&self, role: ChatRole, content: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(role, content);
        self.lock().chat_log.push(message.clone());
        message
    }

    pub fn clear_chat_messages(&self) {
        self.lock().chat_log.clear();
    }

    pub fn email_sources(&self) -> Vec<EmailSource> {
        self.lock().email_sources.clone()
    }

    pub fn folder_sources(&self) -> Vec<FolderSource> {
        self.lock().folder_sources.clone()
    }

    pub fn model_file(&self) -> Option<ModelFile> {
        self.lock().model_file.clone()
    }

    pub fn training_status(&self) -> TrainingStatus {
        self.lock().training.clone()
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.lock().chat_log.clone()
    }

    pub fn has_data_source(&self) -> bool {
        let state = self.lock();
        !state.email_sources.is_empty() || !state.folder_sources.is_empty()
    }
}
