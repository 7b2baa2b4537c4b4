//! Primary provider: Gemini `generateContent`.
//!
//! Auth is the API key as a `key` query parameter. The whole prompt (system
//! instruction + prefixed question) goes in a single text part.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_core::config::schema::DEFAULT_PRIMARY_API_BASE;
use folio_core::config::{ChatConfig, ProviderConfig};
use folio_core::Language;

use crate::error::ProviderError;
use crate::prompt::build_prompt;
use crate::traits::{ChatProvider, GenerationParams};
use crate::transport::send_json;

const DISPLAY_NAME: &str = "Gemini";

// ─────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

// ─────────────────────────────────────────────
// GeminiProvider
// ─────────────────────────────────────────────

/// Gemini client.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    system_prompt: String,
    params: GenerationParams,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_url", &self.api_url)
            .field("configured", &!self.api_key.is_empty())
            .finish()
    }
}

impl GeminiProvider {
    /// Create a client from the primary provider config.
    ///
    /// `client` is shared with the other provider (connection-pooled).
    pub fn new(client: reqwest::Client, config: &ProviderConfig, chat: &ChatConfig) -> Self {
        Self {
            client,
            api_url: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            system_prompt: chat.system_prompt.clone(),
            params: GenerationParams::from(chat),
            timeout: Duration::from_secs(chat.timeout_secs),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn generate(&self, message: &str, language: Language) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::config(DISPLAY_NAME));
        }

        let prompt = build_prompt(&self.system_prompt, language, message);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.params.max_tokens,
                temperature: self.params.temperature,
            },
        };

        debug!(provider = DISPLAY_NAME, language = %language, "Sending request");

        let request = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .json(&body);

        let response: GenerateContentResponse = send_json(DISPLAY_NAME, request).await?;
        response.into_text().ok_or_else(|| {
            ProviderError::malformed(DISPLAY_NAME, "no candidates[0].content.parts[0].text")
        })
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
