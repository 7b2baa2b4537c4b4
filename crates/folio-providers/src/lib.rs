//! LLM provider layer for Folio.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait both vendor clients implement
//! - [`gemini::GeminiProvider`] — primary vendor (Gemini `generateContent`)
//! - [`deepseek::DeepSeekProvider`] — secondary vendor (DeepSeek chat completions)
//! - [`fallback::FallbackResponder`] — primary → secondary fallback
//! - [`service::ChatService`] — validate, respond, and classify errors for callers

pub mod deepseek;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod service;
pub mod traits;
mod transport;

// Re-export main types for convenience
pub use deepseek::DeepSeekProvider;
pub use error::ProviderError;
pub use fallback::{AllProvidersFailed, FallbackResponder};
pub use gemini::GeminiProvider;
pub use service::{ChatError, ChatService, ErrorBody};
pub use traits::{ChatProvider, GenerationParams};
