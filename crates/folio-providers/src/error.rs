//! Provider failure taxonomy.
//!
//! Every variant means "this provider is unusable for this request"; the
//! orchestrator treats them all the same and only logs the difference.

use thiserror::Error;

/// Why a single provider call produced no answer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured. Raised before any network I/O.
    #[error("{provider}: API key not configured")]
    Config { provider: String },

    /// The vendor answered with a non-success status.
    #[error("{provider}: HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    /// The vendor answered 2xx but the payload had no usable answer text.
    #[error("{provider}: invalid response ({detail})")]
    MalformedResponse { provider: String, detail: String },

    /// The request exceeded the configured timeout.
    #[error("{provider}: request timed out")]
    Timeout { provider: String },

    /// Connection refused, DNS failure, TLS error, broken body stream...
    #[error("{provider}: request failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ProviderError {
    /// Stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Config { .. } => "config",
            ProviderError::Http { .. } => "http",
            ProviderError::MalformedResponse { .. } => "malformed_response",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Transport { .. } => "transport",
        }
    }

    /// Name of the provider that failed.
    pub fn provider(&self) -> &str {
        match self {
            ProviderError::Config { provider }
            | ProviderError::Http { provider, .. }
            | ProviderError::MalformedResponse { provider, .. }
            | ProviderError::Timeout { provider }
            | ProviderError::Transport { provider, .. } => provider,
        }
    }

    /// HTTP status, if the vendor responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn config(provider: &str) -> Self {
        ProviderError::Config {
            provider: provider.to_string(),
        }
    }

    pub(crate) fn malformed(provider: &str, detail: impl Into<String>) -> Self {
        ProviderError::MalformedResponse {
            provider: provider.to_string(),
            detail: detail.into(),
        }
    }

    /// Classify a `reqwest` failure.
    ///
    /// The URL is stripped from the source: Gemini carries its key in the query.
    pub(crate) fn from_reqwest(provider: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ProviderError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            ProviderError::Transport {
                provider: provider.to_string(),
                source: source.without_url(),
            }
        }
    }
}
