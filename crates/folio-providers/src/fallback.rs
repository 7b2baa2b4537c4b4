//! Two-tier responder: ask the primary provider, fall back to the secondary.
//!
//! The secondary is only called once the primary's failure is fully known.
//! There is no retry within a provider and no third tier.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use folio_core::utils::truncate_string;
use folio_core::{Config, Language};

use crate::deepseek::DeepSeekProvider;
use crate::error::ProviderError;
use crate::gemini::GeminiProvider;
use crate::traits::ChatProvider;

/// Both providers failed for the same request.
///
/// Carries both causes for operators; callers must not show it to end users.
#[derive(Debug, Error)]
#[error("All LLM services failed. Primary: {primary} | Secondary: {secondary}")]
pub struct AllProvidersFailed {
    pub primary: ProviderError,
    pub secondary: ProviderError,
}

/// Primary → secondary fallback over two [`ChatProvider`]s.
///
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct FallbackResponder {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
}

impl std::fmt::Debug for FallbackResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackResponder")
            .field("primary", &self.primary.display_name())
            .field("secondary", &self.secondary.display_name())
            .finish()
    }
}

impl FallbackResponder {
    pub fn new(primary: Arc<dyn ChatProvider>, secondary: Arc<dyn ChatProvider>) -> Self {
        Self { primary, secondary }
    }

    /// Gemini as primary, DeepSeek as secondary, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();
        let primary = GeminiProvider::new(client.clone(), &config.providers.primary, &config.chat);
        let secondary = DeepSeekProvider::new(client, &config.providers.secondary, &config.chat);

        debug!(?primary, ?secondary, "Creating fallback responder");

        Self::new(Arc::new(primary), Arc::new(secondary))
    }

    /// Answer `message`, trying the primary then (on any failure) the secondary.
    pub async fn respond(
        &self,
        message: &str,
        language: Language,
    ) -> Result<String, AllProvidersFailed> {
        let preview = truncate_string(message, 50);

        info!(provider = self.primary.display_name(), "Attempting primary LLM");
        let primary_err = match self.primary.generate(message, language).await {
            Ok(text) => {
                info!(
                    provider = self.primary.display_name(),
                    message = %preview,
                    "Response from primary LLM"
                );
                return Ok(text);
            }
            Err(e) => e,
        };

        warn!(
            provider = self.primary.display_name(),
            kind = primary_err.kind(),
            error = %primary_err,
            "Primary LLM failed"
        );
        info!(provider = self.secondary.display_name(), "Falling back to secondary LLM");

        match self.secondary.generate(message, language).await {
            Ok(text) => {
                info!(
                    provider = self.secondary.display_name(),
                    message = %preview,
                    "Response from secondary LLM"
                );
                Ok(text)
            }
            Err(secondary_err) => {
                error!(
                    provider = self.secondary.display_name(),
                    kind = secondary_err.kind(),
                    error = %secondary_err,
                    "Secondary LLM also failed"
                );
                Err(AllProvidersFailed {
                    primary: primary_err,
                    secondary: secondary_err,
                })
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// What a stub provider does on every call.
    enum Behavior {
        Answer(&'static str),
        Fail(fn(&str) -> ProviderError),
    }

    struct StubProvider {
        name: &'static str,
        behavior: Behavior,
        calls: AtomicUsize,
        last_input: Mutex<Option<(String, Language)>>,
    }

    impl StubProvider {
        fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: AtomicUsize::new(0),
                last_input: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        async fn generate(
            &self,
            message: &str,
            language: Language,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_input.lock().unwrap() = Some((message.to_string(), language));
            match &self.behavior {
                Behavior::Answer(text) => Ok(text.to_string()),
                Behavior::Fail(make) => Err(make(self.name)),
            }
        }

        fn display_name(&self) -> &str {
            self.name
        }
    }

    fn http_500(provider: &str) -> ProviderError {
        ProviderError::Http {
            provider: provider.to_string(),
            status: 500,
            body: "Internal error".to_string(),
        }
    }

    fn malformed(provider: &str) -> ProviderError {
        ProviderError::malformed(provider, "no candidates")
    }

    fn no_key(provider: &str) -> ProviderError {
        ProviderError::config(provider)
    }

    fn timeout(provider: &str) -> ProviderError {
        ProviderError::Timeout {
            provider: provider.to_string(),
        }
    }

    fn responder(
        primary: &Arc<StubProvider>,
        secondary: &Arc<StubProvider>,
    ) -> FallbackResponder {
        FallbackResponder::new(primary.clone(), secondary.clone())
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let primary = StubProvider::new("Primary", Behavior::Answer("from primary"));
        let secondary = StubProvider::new("Secondary", Behavior::Answer("from secondary"));

        let text = responder(&primary, &secondary)
            .respond("What is 2+2?", Language::En)
            .await
            .unwrap();

        assert_eq!(text, "from primary");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_each_primary_failure_falls_back() {
        let failures: [fn(&str) -> ProviderError; 4] = [http_500, malformed, no_key, timeout];
        for fail in failures {
            let primary = StubProvider::new("Primary", Behavior::Fail(fail));
            let secondary = StubProvider::new("Secondary", Behavior::Answer("from secondary"));

            let text = responder(&primary, &secondary)
                .respond("hi", Language::En)
                .await
                .unwrap();

            assert_eq!(text, "from secondary");
            assert_eq!(primary.calls(), 1);
            assert_eq!(secondary.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_secondary_gets_same_input() {
        let primary = StubProvider::new("Primary", Behavior::Fail(http_500));
        let secondary = StubProvider::new("Secondary", Behavior::Answer("ok"));

        responder(&primary, &secondary)
            .respond("مرحبا", Language::Ar)
            .await
            .unwrap();

        let input = secondary.last_input.lock().unwrap().clone();
        assert_eq!(input, Some(("مرحبا".to_string(), Language::Ar)));
    }

    #[tokio::test]
    async fn test_both_fail_carries_both_causes() {
        let primary = StubProvider::new("Primary", Behavior::Fail(http_500));
        let secondary = StubProvider::new("Secondary", Behavior::Fail(malformed));

        let err = responder(&primary, &secondary)
            .respond("hi", Language::En)
            .await
            .unwrap_err();

        assert_eq!(err.primary.provider(), "Primary");
        assert_eq!(err.primary.status(), Some(500));
        assert_eq!(err.secondary.provider(), "Secondary");
        assert_eq!(err.secondary.kind(), "malformed_response");

        let msg = err.to_string();
        assert!(msg.starts_with("All LLM services failed."));
        assert!(msg.contains("Primary: Primary: HTTP 500"));
        assert!(msg.contains("| Secondary: Secondary: invalid response"));
    }

    #[tokio::test]
    async fn test_no_retry_within_provider() {
        let primary = StubProvider::new("Primary", Behavior::Fail(timeout));
        let secondary = StubProvider::new("Secondary", Behavior::Fail(timeout));

        let _ = responder(&primary, &secondary).respond("hi", Language::En).await;

        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_against_deterministic_stub() {
        let primary = StubProvider::new("Primary", Behavior::Answer("same answer"));
        let secondary = StubProvider::new("Secondary", Behavior::Answer("unused"));
        let responder = responder(&primary, &secondary);

        let first = responder.respond("q", Language::En).await.unwrap();
        let second = responder.respond("q", Language::En).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(primary.calls(), 2);
    }

    #[tokio::test]
    async fn test_from_config_without_keys_fails_locally() {
        // Both keys missing: both failures are config faults, no network involved.
        let responder = FallbackResponder::from_config(&Config::default());

        let err = responder.respond("hi", Language::En).await.unwrap_err();

        assert!(matches!(err.primary, ProviderError::Config { .. }));
        assert!(matches!(err.secondary, ProviderError::Config { .. }));
        assert_eq!(err.primary.provider(), "Gemini");
        assert_eq!(err.secondary.provider(), "DeepSeek");
    }

    #[tokio::test]
    async fn test_combined_error_does_not_expose_key() {
        let mut config = Config::default();
        config.providers.primary.api_key = "g-SECRET-123".to_string();
        config.providers.primary.api_base = Some("http://127.0.0.1:1/generate".to_string());
        let responder = FallbackResponder::from_config(&config);

        let err = responder.respond("hi", Language::En).await.unwrap_err();

        assert_eq!(err.primary.kind(), "transport");
        assert!(!err.to_string().contains("g-SECRET-123"));
        assert!(!format!("{err:?}").contains("g-SECRET-123"));
    }

    #[test]
    fn test_debug_shows_provider_names() {
        let primary = StubProvider::new("Primary", Behavior::Answer("a"));
        let secondary = StubProvider::new("Secondary", Behavior::Answer("b"));
        let dbg = format!("{:?}", responder(&primary, &secondary));
        assert!(dbg.contains("Primary"));
        assert!(dbg.contains("Secondary"));
    }
}
