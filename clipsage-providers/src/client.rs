//! The provider client seam.

use async_trait::async_trait;
use clipsage_core::ProviderId;
use serde::Deserialize;

use crate::error::{ProviderError, Result};

/// One vendor's text-generation endpoint.
///
/// A call sends the system prompt plus `text` to `model` and returns the
/// generated text. Clients do not retry and set no timeout of their own.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// The vendor this client talks to.
    fn provider(&self) -> ProviderId;

    /// Generates a response for `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Api`] for non-success statuses,
    /// [`ProviderError::EmptyResponse`] when no text comes back, and
    /// transport errors as [`ProviderError::Http`].
    async fn call(
        &self,
        api_key: &str,
        model: &str,
        text: &str,
        custom_instructions: Option<&str>,
    ) -> Result<String>;
}

/// Error body shape shared by both vendors: `{"error": {"message": ...}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Turns a non-success response into [`ProviderError::Api`].
pub(crate) async fn api_error(vendor: ProviderId, response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Api {
        vendor,
        status,
        message: error_message(&body),
    }
}

/// Extracts `error.message` from a body, falling back to "Unknown error".
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#),
            "Quota exceeded"
        );
        assert_eq!(error_message(r#"{"error":{}}"#), "Unknown error");
        assert_eq!(error_message("<html>bad gateway</html>"), "Unknown error");
        assert_eq!(error_message(""), "Unknown error");
    }
}
