//! Groq API client (OpenAI-compatible chat completions).

use async_trait::async_trait;
use clipsage_core::ProviderId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::client::{ProviderClient, api_error};
use crate::error::{ProviderError, Result};
use crate::prompt::system_prompt;

/// Groq API base URL.
pub const GROQ_API_BASE: &str = "https://api.groq.com";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: u8,
    max_tokens: u32,
    top_p: u8,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from `chat/completions`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    /// Completion choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    /// Assistant message.
    #[serde(default)]
    pub message: Option<AssistantMessage>,
}

/// The assistant's message.
#[derive(Debug, Default, Deserialize)]
pub struct AssistantMessage {
    /// Message content.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Returns `choices[0].message.content` when present and non-empty.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .message?
            .content
            .filter(|c| !c.is_empty())
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Groq API client.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Creates a client for the public Groq endpoint.
    pub fn new() -> Self {
        Self::with_base_url(GROQ_API_BASE)
    }

    /// Creates a client for another base URL (e.g. a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/openai/v1/chat/completions", self.base_url)
    }
}

impl Default for GroqClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for GroqClient {
    fn provider(&self) -> ProviderId {
        ProviderId::Groq
    }

    #[instrument(skip(self, api_key, text, custom_instructions), fields(chars = text.chars().count()))]
    async fn call(
        &self,
        api_key: &str,
        model: &str,
        text: &str,
        custom_instructions: Option<&str>,
    ) -> Result<String> {
        let prompt = system_prompt(custom_instructions);
        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 1,
            max_tokens: 8192,
            top_p: 1,
            stream: false,
        };

        debug!(model = %model, "Calling Groq chat completions");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(ProviderId::Groq, response).await;
            warn!(model = %model, error = %err, "Groq request failed");
            return Err(err);
        }

        let parsed: ChatResponse = response.json().await?;
        parsed.first_content().ok_or(ProviderError::EmptyResponse {
            vendor: ProviderId::Groq,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
