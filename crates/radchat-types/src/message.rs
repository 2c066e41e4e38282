use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// An image bundled with a message for multimodal analysis.
///
/// `base64` holds the full data URL (`data:image/...;base64,...`).
/// `preview` is an object URL owned by whoever created the attachment;
/// releasing it is the owner's responsibility, not this type's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachment {
    pub id: String,
    pub base64: String,
    pub preview: String,
    pub mime_type: String,
}

impl ImageAttachment {
    pub fn new(base64: impl Into<String>, preview: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: format!("img-{}", Uuid::new_v4()),
            base64: base64.into(),
            preview: preview.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// A single message in a conversation. Immutable once created;
/// appended to a session's ordered message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<ImageAttachment>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::user_with_images(text, Vec::new())
    }

    pub fn user_with_images(text: impl Into<String>, images: Vec<ImageAttachment>) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            role: Role::User,
            content: text.into(),
            timestamp: Utc::now(),
            images,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            role: Role::Assistant,
            content: text.into(),
            timestamp: Utc::now(),
            images: Vec::new(),
        }
    }
}

// ─── Wire payload types ──────────────────────────────────────
//
// Session messages store plain text; the structured multi-part form
// exists only on the wire, when images ride along with a user entry.

/// Content of an outbound completion entry — text or structured parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn as_text(&self) -> &str {
        match self {
            MessageContent::Text(s) => s,
            MessageContent::Parts(parts) => parts
                .iter()
                .find_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// One entry of the outbound message list sent to the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl OutboundMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(text.into()),
        }
    }
}
