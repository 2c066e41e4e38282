//! Pure message formatting for the completion endpoint.
//!
//! Builds the outbound message list from a session's state and computes
//! the confidence heuristic from reported token usage. No I/O here; the
//! platform adapter owns the wire.

use radchat_types::message::{
    ContentPart, ImageAttachment, ImageUrl, Message, MessageContent, OutboundMessage, Role,
};
use serde::Deserialize;

/// How many trailing history entries ride along with each request
pub const HISTORY_WINDOW: usize = 10;

/// Token usage block of a completion response
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Confidence heuristic from token usage: floor of 0.8 when the endpoint
/// reported no totals, otherwise 0.5 + half the completion/total ratio,
/// capped at 0.95.
pub fn confidence_from_usage(usage: &TokenUsage) -> f64 {
    if usage.total_tokens == 0 {
        return 0.8;
    }
    let ratio = f64::from(usage.completion_tokens) / f64::from(usage.total_tokens);
    (0.5 + ratio * 0.5).min(0.95)
}

/// Build the outbound message list for a conversational request.
///
/// System prompt first, then the last [`HISTORY_WINDOW`] entries of the
/// session restricted to user/assistant roles. When `images` is non-empty
/// and the trailing entry is a user message, that entry is converted to
/// multipart form: its text followed by one image_url part per attachment.
pub fn build_outbound(
    system_prompt: &str,
    history: &[Message],
    images: &[ImageAttachment],
) -> Vec<OutboundMessage> {
    let mut outbound = vec![OutboundMessage::system(system_prompt)];

    let skip = history.len().saturating_sub(HISTORY_WINDOW);
    for msg in &history[skip..] {
        match msg.role {
            Role::User | Role::Assistant => {
                outbound.push(OutboundMessage::text(msg.role, &msg.content));
            }
            Role::System => {}
        }
    }

    if !images.is_empty() {
        if let Some(last) = outbound.last_mut() {
            if last.role == Role::User {
                let mut parts = vec![ContentPart::Text {
                    text: last.content.as_text().to_string(),
                }];
                for img in images {
                    parts.push(ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: img.base64.clone(),
                        },
                    });
                }
                last.content = MessageContent::Parts(parts);
            }
        }
    }

    outbound
}

/// Build the two-entry message list for single-shot image analysis:
/// the system prompt plus one multipart user entry carrying the analysis
/// prompt and a single image.
pub fn build_image_analysis(
    system_prompt: &str,
    prompt: &str,
    image_base64: &str,
) -> Vec<OutboundMessage> {
    vec![
        OutboundMessage::system(system_prompt),
        OutboundMessage {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_base64.to_string(),
                    },
                },
            ]),
        },
    ]
}
