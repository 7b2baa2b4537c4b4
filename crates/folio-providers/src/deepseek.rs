//! Secondary provider: DeepSeek chat completions (OpenAI-compatible).
//!
//! Auth is `Authorization: Bearer <key>`. The system prompt goes in its own
//! `system` message; the prefixed question is the `user` message.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_core::config::schema::{DEFAULT_SECONDARY_API_BASE, DEFAULT_SECONDARY_MODEL};
use folio_core::config::{ChatConfig, ProviderConfig};
use folio_core::Language;

use crate::error::ProviderError;
use crate::prompt::user_question;
use crate::traits::{ChatProvider, GenerationParams};
use crate::transport::send_json;

const DISPLAY_NAME: &str = "DeepSeek";

// ─────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if present and non-empty.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|c| !c.is_empty())
    }
}

// ─────────────────────────────────────────────
// DeepSeekProvider
// ─────────────────────────────────────────────

/// DeepSeek client.
pub struct DeepSeekProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    system_prompt: String,
    params: GenerationParams,
    timeout: Duration,
}

impl std::fmt::Debug for DeepSeekProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepSeekProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("configured", &!self.api_key.is_empty())
            .finish()
    }
}

impl DeepSeekProvider {
    /// Create a client from the secondary provider config.
    pub fn new(client: reqwest::Client, config: &ProviderConfig, chat: &ChatConfig) -> Self {
        Self {
            client,
            api_url: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_SECONDARY_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_SECONDARY_MODEL.to_string()),
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

    /// The model sent in each request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    async fn generate(&self, message: &str, language: Language) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::config(DISPLAY_NAME));
        }

        let question = user_question(language, message);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &question,
                },
            ],
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        debug!(
            provider = DISPLAY_NAME,
            model = %self.model,
            language = %language,
            "Sending request"
        );

        let request = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body);

        let response: ChatCompletionResponse = send_json(DISPLAY_NAME, request).await?;
        response
            .into_text()
            .ok_or_else(|| ProviderError::malformed(DISPLAY_NAME, "no choices[0].message.content"))
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(api_key: &str, server: &MockServer) -> DeepSeekProvider {
        let config = ProviderConfig {
            api_key: api_key.to_string(),
            api_base: Some(format!("{}/chat/completions", server.uri())),
            model: None,
        };
        DeepSeekProvider::new(reqwest::Client::new(), &config, &ChatConfig::default())
    }

    fn answer(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        })
    }

    #[test]
    fn test_defaults_from_empty_config() {
        let provider = DeepSeekProvider::new(
            reqwest::Client::new(),
            &ProviderConfig::default(),
            &ChatConfig::default(),
        );
        assert_eq!(provider.api_url, DEFAULT_SECONDARY_API_BASE);
        assert_eq!(provider.model(), "deepseek-chat");
        assert_eq!(provider.display_name(), "DeepSeek");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer ds-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("4")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let text = provider.generate("What is 2+2?", Language::En).await.unwrap();
        assert_eq!(text, "4");
    }

    #[tokio::test]
    async fn test_sends_exact_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_json(json!({
                "model": "deepseek-chat",
                "messages": [
                    { "role": "system", "content": "You are a helpful AI assistant." },
                    { "role": "user", "content": "User question: What is 2+2?" }
                ],
                "max_tokens": 500,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok")))
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let text = provider.generate("What is 2+2?", Language::En).await.unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_arabic_prefix_in_user_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "messages": [
                    { "role": "system", "content": "You are a helpful AI assistant." },
                    { "role": "user", "content": "سؤال المستخدم: What is 2+2?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("٤")))
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let text = provider.generate("What is 2+2?", Language::Ar).await.unwrap();
        assert_eq!(text, "٤");
    }

    #[tokio::test]
    async fn test_configured_model_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "model": "deepseek-reasoner" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("ok")))
            .mount(&server)
            .await;

        let config = ProviderConfig {
            api_key: "ds-key".into(),
            api_base: Some(format!("{}/chat/completions", server.uri())),
            model: Some("deepseek-reasoner".into()),
        };
        let provider =
            DeepSeekProvider::new(reqwest::Client::new(), &config, &ChatConfig::default());

        assert_eq!(provider.generate("hi", Language::En).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let provider = make_provider("", &server);
        let err = provider.generate("hi", Language::En).await.unwrap_err();
        assert_eq!(err.kind(), "config");
        assert_eq!(err.provider(), "DeepSeek");
    }

    #[tokio::test]
    async fn test_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": { "message": "Insufficient Balance", "type": "unknown_error" }
            })))
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let err = provider.generate("hi", Language::En).await.unwrap_err();
        assert_eq!(err.status(), Some(402));
        assert!(err.to_string().contains("Insufficient Balance"));
    }

    #[tokio::test]
    async fn test_null_content_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let err = provider.generate("hi", Language::En).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server);
        let err = provider.generate("hi", Language::En).await.unwrap_err();
        assert_eq!(err.kind(), "malformed_response");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(answer("too late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let provider = make_provider("ds-key", &server).with_timeout(Duration::from_millis(100));
        let err = provider.generate("hi", Language::En).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }
}
