//! Provider error types.

use clipsage_core::ProviderId;
use thiserror::Error;

/// Substrings that mark an error message as a rate-limit rejection.
const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "429",
    "quota",
    "resource_exhausted",
    "too many requests",
];

/// Errors from calling a vendor or running the failover walk.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key is configured for the selected provider.
    #[error("Please set your {} API key with `clipsage config key {}`", .0.display_name(), .0.cli_name())]
    MissingApiKey(ProviderId),

    /// The vendor answered with a non-success status.
    #[error("{} API error (HTTP {status}): {message}", vendor.display_name())]
    Api {
        /// Vendor that failed.
        vendor: ProviderId,
        /// HTTP status code.
        status: u16,
        /// `error.message` from the body, or "Unknown error".
        message: String,
    },

    /// The vendor answered successfully but without generated text.
    #[error("No response from {} API", vendor.display_name())]
    EmptyResponse {
        /// Vendor that answered.
        vendor: ProviderId,
    },

    /// Every model from the starting index onward was rate-limited.
    #[error("All models are rate limited. Please try again later.")]
    AllModelsRateLimited {
        /// Models that were tried, in order.
        attempts: Vec<String>,
    },

    /// The provider configuration lists no models.
    #[error("No models configured for {}", .0.display_name())]
    NoModels(ProviderId),

    /// No client is registered for the provider.
    #[error("No client available for {}", .0.display_name())]
    NoClient(ProviderId),

    /// Transport-level HTTP failure. Built through `From`, which strips the
    /// request URL so a query-string API key never reaches the message.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Response body could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl ProviderError {
    /// Returns true if this error looks like a rate-limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        is_rate_limit_message(&self.to_string())
    }
}

/// Case-insensitive check for rate-limit markers in an error message.
pub fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m))
}

/// A convenience alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_markers() {
        assert!(is_rate_limit_message("Rate limit reached for model"));
        assert!(is_rate_limit_message("HTTP 429"));
        assert!(is_rate_limit_message("You exceeded your current QUOTA"));
        assert!(is_rate_limit_message("status: RESOURCE_EXHAUSTED"));
        assert!(is_rate_limit_message("Too Many Requests"));
        assert!(!is_rate_limit_message("API key not valid"));
        assert!(!is_rate_limit_message(""));
    }

    #[test]
    fn test_api_error_display() {
        let err = ProviderError::Api {
            vendor: ProviderId::Gemini,
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gemini API error (HTTP 429): Resource has been exhausted"
        );
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_non_rate_limit_api_error() {
        let err = ProviderError::Api {
            vendor: ProviderId::Groq,
            status: 401,
            message: "Invalid API Key".to_string(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_missing_key_mentions_api_key() {
        let err = ProviderError::MissingApiKey(ProviderId::Groq);
        assert!(err.to_string().contains("API key"));
        assert!(err.to_string().contains("Groq"));
    }

    #[test]
    fn test_empty_response_display() {
        let err = ProviderError::EmptyResponse {
            vendor: ProviderId::Gemini,
        };
        assert_eq!(err.to_string(), "No response from Gemini API");
    }
}
