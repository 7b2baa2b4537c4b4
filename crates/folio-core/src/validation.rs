//! Inbound request validation.
//!
//! Runs before the orchestrator: a rejected request never reaches a provider.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::types::{ChatRequest, Language};

/// Why an inbound chat request was rejected.
///
/// The `Display` text is safe to return to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is required and must be a string")]
    MissingMessage,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Language must be \"en\" or \"ar\"")]
    UnsupportedLanguage(String),
}

/// Validate a raw JSON request body of the form
/// `{ "message": string, "language"?: "en" | "ar" }`.
///
/// Pure function of its input apart from a `warn!` on rejection.
pub fn validate(raw: &Value) -> Result<ChatRequest, ValidationError> {
    let message = match raw.get("message") {
        Some(Value::String(s)) => s,
        _ => {
            warn!("invalid chat request: missing or non-string message");
            return Err(ValidationError::MissingMessage);
        }
    };

    if message.trim().is_empty() {
        warn!("invalid chat request: empty message");
        return Err(ValidationError::EmptyMessage);
    }

    let language = match raw.get("language") {
        None => Language::default(),
        Some(Value::String(code)) => Language::parse(code).ok_or_else(|| {
            warn!(language = %code, "invalid language requested");
            ValidationError::UnsupportedLanguage(code.clone())
        })?,
        // null, numbers, arrays... are present but not a supported code
        Some(other) => {
            warn!(language = %other, "invalid language requested");
            return Err(ValidationError::UnsupportedLanguage(other.to_string()));
        }
    };

    Ok(ChatRequest {
        message: message.clone(),
        language,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
