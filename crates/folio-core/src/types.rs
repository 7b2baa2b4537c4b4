//! Core request/response types for the chat endpoint.
//!
//! Everything here is request-scoped: nothing is persisted and no state is
//! carried from one chat request to the next.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────

/// Supported answer languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// Parse a language code. Only the exact lowercase codes are accepted.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// The two-letter code (`"en"` / `"ar"`).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Prefix placed directly before the user's message in a prompt.
    pub fn question_prefix(self) -> &'static str {
        match self {
            Language::En => "User question: ",
            Language::Ar => "سؤال المستخدم: ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─────────────────────────────────────────────
// Chat request / response
// ─────────────────────────────────────────────

/// A validated chat request.
///
/// Only [`crate::validation::validate`] produces these, so `message` always
/// has non-whitespace content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    /// The raw message, as sent by the caller (not trimmed).
    pub message: String,
    pub language: Language,
}

/// Envelope returned to the UI on success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The answer text, verbatim from the provider.
    pub response: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    /// Wrap an answer, stamped with the current time.
    pub fn new(response: impl Into<String>, language: Language) -> Self {
        Self {
            response: response.into(),
            language,
            timestamp: Utc::now(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
