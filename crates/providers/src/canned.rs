use crate::{ChatProvider, ProviderError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    Contains { needle: String },
    All { all: Vec<Trigger> },
    Any { any: Vec<Trigger> },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplyRule {
    pub name: String,
    pub priority: i32,
    pub trigger: Trigger,
    pub reply: String,
}

pub fn matches(trigger: &Trigger, normalized: &str) -> bool {
    match trigger {
        Trigger::Contains { needle } => normalized.contains(&needle.to_lowercase()),
        Trigger::All { all } => all.iter().all(|t| matches(t, normalized)),
        Trigger::Any { any } => any.iter().any(|t| matches(t, normalized)),
    }
}

/// First matching rule wins; `fallback` covers everything else.
/// Rules are expected to be sorted by priority already.
pub fn select_reply<'a>(rules: &'a [ReplyRule], fallback: &'a str, message: &str) -> &'a str {
    let normalized = message.to_lowercase();
    rules
        .iter()
        .find(|r| matches(&r.trigger, &normalized))
        .map(|r| r.reply.as_str())
        .unwrap_or(fallback)
}

pub const DEFAULT_REPLY: &str = "I've analyzed your emails and data folders. Based on the content, I can help you organize information, find specific documents, or analyze patterns in your communications. What specific aspect would you like to explore?";

pub fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule {
            name: "found-emails".to_string(),
            priority: 1,
            trigger: all(vec![contains("email"), contains("find")]),
            reply: "I found several emails matching your criteria. The most relevant ones are from your work inbox, dated March 15-20, 2025, regarding the project timeline.".to_string(),
        },
        ReplyRule {
            name: "data-summary".to_string(),
            priority: 2,
            trigger: all(vec![contains("data"), contains("summary")]),
            reply: "Based on the data folders you provided, I can see patterns in your document organization. You have approximately 1,243 documents across 87 folders, with the most frequent topics being project reports, financial statements, and marketing materials.".to_string(),
        },
        ReplyRule {
            name: "greeting".to_string(),
            priority: 3,
            trigger: any(vec![contains("hello"), contains("hi")]),
            reply: "Hello! I'm your personalized assistant trained on your emails and data folders. How can I help you analyze or find information in your data today?".to_string(),
        },
        ReplyRule {
            name: "searched".to_string(),
            priority: 4,
            trigger: any(vec![contains("search"), contains("find")]),
            reply: "I've searched through your data and found several relevant items. Would you like me to summarize them or show you the most important ones first?".to_string(),
        },
    ]
}

fn contains(needle: &str) -> Trigger {
    Trigger::Contains {
        needle: needle.to_string(),
    }
}

fn all(all: Vec<Trigger>) -> Trigger {
    Trigger::All { all }
}

fn any(any: Vec<Trigger>) -> Trigger {
    Trigger::Any { any }
}

pub struct CannedProvider {
    rules: Vec<ReplyRule>,
    fallback: String,
}

impl CannedProvider {
    pub fn new(mut rules: Vec<ReplyRule>, fallback: impl Into<String>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self {
            rules,
            fallback: fallback.into(),
        }
    }
}

impl Default for CannedProvider {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_REPLY)
    }
}

#[async_trait::async_trait]
impl ChatProvider for CannedProvider {
    async fn reply(&self, message: &str) -> Result<String, ProviderError> {
        Ok(select_reply(&self.rules, &self.fallback, message).to_string())
    }
}
