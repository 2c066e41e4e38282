//! Hosted completion endpoint adapter.
//!
//! Speaks the chat-completions wire format against the fixed hosted
//! endpoint, with the customer id and bearer headers on every request.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use radchat_core::completion::{confidence_from_usage, TokenUsage};
use radchat_core::ports::{AiResponse, CompletionPort};
use radchat_types::{
    config::{LlmConfig, IMAGE_ANALYSIS_MAX_TOKENS, IMAGE_ANALYSIS_TEMPERATURE},
    message::OutboundMessage,
    AppError, Result,
};

pub struct RemoteCompletionProvider {
    config: LlmConfig,
}

impl RemoteCompletionProvider {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    fn build_request_body(
        &self,
        messages: &[OutboundMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Value {
        json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        })
    }

    async fn complete(
        &self,
        messages: Vec<OutboundMessage>,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<AiResponse> {
        let body = self.build_request_body(&messages, max_tokens, temperature);

        let response = Request::post(&self.config.endpoint)
            .header("customerId", &self.config.customer_id)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| AppError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AppError::RemoteService { status, body: text });
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|_| AppError::InvalidResponse)?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or(AppError::InvalidResponse)?;
        let message = choice.message.content.ok_or(AppError::InvalidResponse)?;
        let confidence = data.usage.as_ref().map(confidence_from_usage);

        Ok(AiResponse {
            message,
            confidence,
        })
    }
}

#[async_trait(?Send)]
impl CompletionPort for RemoteCompletionProvider {
    async fn send_message(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse> {
        self.complete(messages, self.config.max_tokens, self.config.temperature)
            .await
    }

    async fn analyze_image(&self, messages: Vec<OutboundMessage>) -> Result<AiResponse> {
        self.complete(
            messages,
            IMAGE_ANALYSIS_MAX_TOKENS,
            IMAGE_ANALYSIS_TEMPERATURE,
        )
        .await
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
