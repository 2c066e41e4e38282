//! Demo REST surface as framework-free handlers.
//!
//! Each handler takes its collaborators explicitly and returns a status
//! code plus JSON body, so any HTTP host (or a test) can mount them.
//! Success bodies carry `success: true`; failures carry
//! `{"success": false, "error": ...}` with the status from
//! [`AppError::http_status`].

use crate::cases::CaseStore;
use crate::completion::{build_image_analysis, build_outbound};
use crate::ports::CompletionPort;
use radchat_types::case::{CaseDraft, CasePatch};
use radchat_types::message::Message;
use radchat_types::prompt::default_prompt;
use radchat_types::AppError;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn fail(err: AppError) -> Self {
        Self {
            status: err.http_status(),
            body: json!({ "success": false, "error": err.to_string() }),
        }
    }
}

impl From<AppError> for ApiReply {
    fn from(err: AppError) -> Self {
        Self::fail(err)
    }
}

// ─── /api/cases ──────────────────────────────────────────────

pub fn get_cases(store: &CaseStore) -> ApiReply {
    ApiReply::ok(json!({
        "success": true,
        "cases": store.list(),
        "count": store.len(),
    }))
}

pub fn post_case(store: &mut CaseStore, body: &Value) -> ApiReply {
    let draft: CaseDraft = match serde_json::from_value(body.clone()) {
        Ok(d) => d,
        Err(e) => return ApiReply::fail(AppError::Validation(e.to_string())),
    };
    let case = store.create(draft);
    ApiReply::ok(json!({
        "success": true,
        "case": case,
        "message": "Case created successfully",
    }))
}

pub fn put_case(store: &mut CaseStore, body: &Value) -> ApiReply {
    let id = match body.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return ApiReply::fail(AppError::Validation("Case ID is required".to_string())),
    };
    let mut updates = body.clone();
    if let Some(obj) = updates.as_object_mut() {
        obj.remove("id");
    }
    let patch: CasePatch = match serde_json::from_value(updates) {
        Ok(p) => p,
        Err(e) => return ApiReply::fail(AppError::Validation(e.to_string())),
    };
    match store.update(&id, patch) {
        Ok(case) => ApiReply::ok(json!({
            "success": true,
            "case": case,
            "message": "Case updated successfully",
        })),
        Err(e) => ApiReply::fail(e),
    }
}

pub fn delete_case(store: &mut CaseStore, id: Option<&str>) -> ApiReply {
    let id = match id {
        Some(id) if !id.is_empty() => id,
        _ => return ApiReply::fail(AppError::Validation("Case ID is required".to_string())),
    };
    match store.remove(id) {
        Ok(case) => ApiReply::ok(json!({
            "success": true,
            "deletedCase": case,
            "message": "Case deleted successfully",
        })),
        Err(e) => ApiReply::fail(e),
    }
}

// ─── /api/chat ───────────────────────────────────────────────

/// Conversational completion. Requires `messages` and `systemPrompt`;
/// when `images` is present the first image is routed through the
/// analysis parameters with the last message's text as the prompt.
pub async fn post_chat(llm: &dyn CompletionPort, body: &Value) -> ApiReply {
    let system_prompt = body.get("systemPrompt").and_then(Value::as_str);
    let raw_messages = body.get("messages");
    let (system_prompt, raw_messages) = match (system_prompt, raw_messages) {
        (Some(p), Some(m)) => (p, m),
        _ => {
            return ApiReply::fail(AppError::Validation(
                "Messages and system prompt are required".to_string(),
            ))
        }
    };

    let messages: Vec<Message> = match serde_json::from_value(raw_messages.clone()) {
        Ok(m) => m,
        Err(e) => return ApiReply::fail(AppError::Validation(e.to_string())),
    };

    let first_image = body
        .get("images")
        .and_then(Value::as_array)
        .and_then(|imgs| imgs.first())
        .and_then(|img| img.get("base64"))
        .and_then(Value::as_str);

    let result = match first_image {
        Some(base64) => {
            let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            llm.analyze_image(build_image_analysis(system_prompt, prompt, base64))
                .await
        }
        None => {
            llm.send_message(build_outbound(system_prompt, &messages, &[]))
                .await
        }
    };

    match result {
        Ok(reply) => ApiReply::ok(json!({
            "success": true,
            "message": reply.message,
            "confidence": reply.confidence,
        })),
        Err(e) => ApiReply::fail(e),
    }
}

pub fn get_chat_info() -> ApiReply {
    ApiReply::ok(json!({
        "message": "AI Radiology Chat API is running",
        "endpoints": {
            "chat": "POST /api/chat - Send chat messages",
            "image-analysis": "POST /api/image-analysis - Analyze medical images",
            "cases": "GET/POST /api/cases - Manage radiology cases",
        }
    }))
}

// ─── /api/image-analysis ─────────────────────────────────────

/// Single-shot image analysis. Requires `imageBase64` and `prompt`;
/// `systemPrompt` falls back to the catalog default.
pub async fn post_image_analysis(llm: &dyn CompletionPort, body: &Value) -> ApiReply {
    let image = body.get("imageBase64").and_then(Value::as_str);
    let prompt = body.get("prompt").and_then(Value::as_str);
    let (image, prompt) = match (image, prompt) {
        (Some(i), Some(p)) if !i.is_empty() && !p.is_empty() => (i, p),
        _ => {
            return ApiReply::fail(AppError::Validation(
                "Image data and analysis prompt are required".to_string(),
            ))
        }
    };
    let system_prompt = body
        .get("systemPrompt")
        .and_then(Value::as_str)
        .unwrap_or(default_prompt().prompt);

    match llm
        .analyze_image(build_image_analysis(system_prompt, prompt, image))
        .await
    {
        Ok(reply) => ApiReply::ok(json!({
            "success": true,
            "analysis": reply.message,
            "confidence": reply.confidence,
            "model": llm.model(),
        })),
        Err(e) => ApiReply::fail(e),
    }
}

pub fn get_image_analysis_info() -> ApiReply {
    ApiReply::ok(json!({
        "message": "AI Radiology Image Analysis API",
        "description": "Upload medical images for AI-powered analysis and interpretation",
        "supportedFormats": ["image/jpeg", "image/png", "image/webp", "image/tiff"],
        "maxFileSize": "10MB",
    }))
}
