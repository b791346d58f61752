use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pst,
    Olm,
    Mbox,
    Other,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSource {
    pub id: Uuid,
    pub path: String,
    pub kind: SourceKind,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSource {
    pub id: Uuid,
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub id: Uuid,
    pub path: String,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPhase {
    Idle,
    Preparing,
    Training,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub phase: TrainingPhase,
    pub progress: u8,
    pub message: String,
}

impl Default for TrainingStatus {
    fn default() -> Self {
        Self {
            phase: TrainingPhase::Idle,
            progress: 0,
            message: "Ready to start training".to_string(),
        }
    }
}

/// Partial update merged field-by-field into the current status record.
#[derive(Debug, Clone, Default)]
pub struct TrainingUpdate {
    pub phase: Option<TrainingPhase>,
    pub progress: Option<u8>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
