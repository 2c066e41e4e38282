//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `radchat-core` (pure Rust).
//! Implementations live in `radchat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use radchat_types::{message::OutboundMessage, Result};

// ─── Completion Port ─────────────────────────────────────────

/// Assistant reply returned by the completion endpoint.
///
/// `confidence` is a heuristic derived from token usage; absent when
/// the endpoint reported no usage data.
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub message: String,
    pub confidence: Option<f64>,
}

#[async_trait(?Send)]
pub trait CompletionPort {
    /// Conversational completion with chat parameters.
    /// The message list may carry multipart image entries.
    async fn send_message(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse>;

    /// Single-shot image analysis with longer, lower-temperature parameters
    async fn analyze_image(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse>;

    /// Model identifier this port talks to (for logging and API replies)
    fn model(&self) -> &str;
}

// ─── Storage Port ────────────────────────────────────────────

/// Key-value persistence over JSON documents. One key holds one
/// serialized collection; values are whole-document writes.
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a document by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace a document
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a document
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
