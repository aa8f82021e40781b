//! Gemini API client.
//!
//! Calls `generateContent` with the system prompt and user text joined into
//! a single part. The API key travels as the `key` query parameter.

use async_trait::async_trait;
use clipsage_core::ProviderId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::client::{ProviderClient, api_error};
use crate::error::{ProviderError, Result};
use crate::prompt::system_prompt;

// ============================================================================
// Constants
// ============================================================================

/// Gemini API base URL (Generative Language API).
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response from `generateContent`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    /// Generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    /// Candidate content.
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Content of a candidate.
#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    /// Text parts.
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A text part.
#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    /// Generated text.
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Returns `candidates[0].content.parts[0].text` when present and non-empty.
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client for the public Gemini endpoint.
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Creates a client for another base URL (e.g. a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
    }

    #[instrument(skip(self, api_key, text, custom_instructions), fields(chars = text.chars().count()))]
    async fn call(
        &self,
        api_key: &str,
        model: &str,
        text: &str,
        custom_instructions: Option<&str>,
    ) -> Result<String> {
        let prompt = format!("{}\n\n{text}", system_prompt(custom_instructions));
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        debug!(model = %model, "Calling Gemini generateContent");
        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(ProviderId::Gemini, response).await;
            warn!(model = %model, error = %err, "Gemini request failed");
            return Err(err);
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text().ok_or(ProviderError::EmptyResponse {
            vendor: ProviderId::Gemini,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
