use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Connection parameters for the hosted completion endpoint.
///
/// A single fixed endpoint with bearer auth and a customer identifier
/// header; no per-request overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub customer_id: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const DEFAULT_ENDPOINT: &str = "https://oi-server.onrender.com/chat/completions";
pub const DEFAULT_MODEL: &str = "openrouter/anthropic/claude-sonnet-4";

/// Request parameters for the single-shot image analysis variant
pub const IMAGE_ANALYSIS_MAX_TOKENS: u32 = 3000;
pub const IMAGE_ANALYSIS_TEMPERATURE: f32 = 0.2;

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            customer_id: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}
