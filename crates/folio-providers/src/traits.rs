//! Chat provider trait — the seam between the orchestrator and each vendor.

use async_trait::async_trait;
use folio_core::config::ChatConfig;
use folio_core::Language;

use crate::error::ProviderError;

/// Generation budget sent with every vendor call.
///
/// Comes from configuration, never from the inbound request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl From<&ChatConfig> for GenerationParams {
    fn from(config: &ChatConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// One LLM vendor, reduced to "question in, answer text out".
///
/// Implementations make at most one HTTP call per `generate` and never retry.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Ask the vendor a single question.
    ///
    /// Returns the answer text verbatim, or a typed failure.
    async fn generate(&self, message: &str, language: Language) -> Result<String, ProviderError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
