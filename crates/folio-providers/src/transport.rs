//! Shared send → status check → typed decode path for vendor calls.

use serde::de::DeserializeOwned;
use tracing::error;

use folio_core::utils::truncate_string;

use crate::error::ProviderError;

/// Longest error body kept in a `ProviderError::Http`.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Send a prepared request and decode a 2xx body into `T`.
///
/// Non-2xx responses become `Http` errors carrying the vendor's error message;
/// bodies that do not match `T` become `MalformedResponse`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e))?;

    if !status.is_success() {
        let detail = error_detail(&body);
        error!(
            provider,
            status = status.as_u16(),
            body = %body,
            "API error"
        );
        return Err(ProviderError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: truncate_string(&detail, MAX_ERROR_BODY_CHARS),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(provider, error = %e, "Failed to parse LLM response");
        ProviderError::malformed(provider, format!("undecodable body: {e}"))
    })
}

/// Best-effort extraction of a vendor error message.
///
/// Both vendors use `{"error": {"message": ...}}`; anything else is kept raw.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
