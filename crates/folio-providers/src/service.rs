//! Chat service — the entry point an HTTP handler or the CLI calls.
//!
//! Validates the raw body, runs the fallback responder, and wraps the answer
//! in a [`ChatResponse`]. Failures are classified into a status code and a
//! user-safe message; vendor details stay in the logs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use folio_core::validation::{validate, ValidationError};
use folio_core::{ChatResponse, Config};

use crate::fallback::{AllProvidersFailed, FallbackResponder};

/// Message shown to users when no provider could answer.
pub const UNAVAILABLE_MESSAGE: &str = "Failed to generate response. Please try again later.";

/// Failure of a whole chat request.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request was rejected before any provider was called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Every provider failed.
    #[error(transparent)]
    Unavailable(#[from] AllProvidersFailed),
}

impl ChatError {
    /// HTTP status an HTTP layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::Validation(_) => 400,
            ChatError::Unavailable(_) => 500,
        }
    }

    /// Text that is safe to show the end user.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Validation(e) => e.to_string(),
            ChatError::Unavailable(_) => UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    /// JSON error envelope for the response body.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.user_message(),
        }
    }
}

/// `{ "error": "..." }` response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Stateless request handler over a [`FallbackResponder`].
#[derive(Clone, Debug)]
pub struct ChatService {
    responder: FallbackResponder,
}

impl ChatService {
    pub fn new(responder: FallbackResponder) -> Self {
        Self { responder }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(FallbackResponder::from_config(config))
    }

    /// Handle one raw chat request body.
    pub async fn handle(&self, raw: &Value) -> Result<ChatResponse, ChatError> {
        let request = validate(raw)?;

        match self
            .responder
            .respond(&request.message, request.language)
            .await
        {
            Ok(answer) => Ok(ChatResponse::new(answer, request.language)),
            Err(e) => {
                error!(error = %e, "Chat request failed");
                Err(e.into())
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
