//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProvidersConfig` (primary + secondary), `ChatConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

/// Default Gemini `generateContent` endpoint (primary provider).
pub const DEFAULT_PRIMARY_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default DeepSeek chat completions endpoint (secondary provider).
pub const DEFAULT_SECONDARY_API_BASE: &str = "https://api.deepseek.com/chat/completions";

/// Default DeepSeek model.
pub const DEFAULT_SECONDARY_MODEL: &str = "deepseek-chat";

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — built once at startup, read-only afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub chat: ChatConfig,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Connection settings for one LLM provider.
///
/// An empty `api_key` is allowed here; the provider reports it as a
/// configuration fault the first time it is called.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Full endpoint URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier, for providers that take one in the request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// The two providers, in fallback order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    /// Tried first (Gemini).
    pub primary: ProviderConfig,
    /// Tried only after the primary fails (DeepSeek).
    pub secondary: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            primary: ProviderConfig {
                api_key: String::new(),
                api_base: Some(DEFAULT_PRIMARY_API_BASE.to_string()),
                model: None,
            },
            secondary: ProviderConfig {
                api_key: String::new(),
                api_base: Some(DEFAULT_SECONDARY_API_BASE.to_string()),
                model: Some(DEFAULT_SECONDARY_MODEL.to_string()),
            },
        }
    }
}

// ─────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────

/// Prompt and generation settings shared by both providers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    /// Instruction placed before every user question.
    pub system_prompt: String,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Per-provider request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 15,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
