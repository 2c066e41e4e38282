use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;
use crate::prompt::RadiologyCategory;

/// Maximum title length derived from a message before truncation
pub const TITLE_MAX_CHARS: usize = 50;

/// A persisted conversation session.
///
/// Messages are append-only in creation order; title and system prompt
/// are the only mutable text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub system_prompt: String,
    pub category: RadiologyCategory,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>, category: RadiologyCategory) -> Self {
        let now = Utc::now();
        Self {
            id: format!("session-{}", Uuid::new_v4()),
            title: format!("New {} Session", category.label()),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            system_prompt: system_prompt.into(),
            category,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            updated_at: self.updated_at,
            message_count: self.messages.len(),
        }
    }
}

/// Derive a session title from the first user message: the first 50
/// characters, with an ellipsis marker when truncated.
pub fn derive_title(content: &str) -> String {
    let truncated: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

/// Summary of a session for listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}
