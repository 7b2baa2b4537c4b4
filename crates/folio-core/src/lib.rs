//! Folio Core — types, request validation, and configuration.
//!
//! This crate contains:
//! - **types**: `Language`, `ChatRequest`, `ChatResponse`
//! - **validation**: inbound request checks, run before any provider call
//! - **config**: immutable startup configuration (JSON file + environment)

pub mod config;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use types::{ChatRequest, ChatResponse, Language};
pub use validation::{validate, ValidationError};
