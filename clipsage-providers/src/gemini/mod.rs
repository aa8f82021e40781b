//! Gemini (Google) provider.
//!
//! Gemini is the primary provider. It offers several models of different
//! cost and throughput, which the failover walk steps through when a model
//! is rate-limited.
//!
//! ## API Endpoint
//!
//! - `POST /v1beta/models/{model}:generateContent?key={apiKey}`
//!
//! The system prompt and the user text are sent as one part, separated by a
//! blank line. The answer is `candidates[0].content.parts[0].text`.

mod api;

pub use api::{GEMINI_API_BASE, GeminiClient, GenerateResponse};

use clipsage_core::ProviderId;
use std::sync::Arc;

use crate::client::ProviderClient;
use crate::descriptor::ProviderDescriptor;

/// Creates the Gemini provider descriptor.
pub fn gemini_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderId::Gemini)
        .api_base(GEMINI_API_BASE)
        .key_url("https://aistudio.google.com/app/apikey")
        .supports_failover(true)
        .build_client(default_client)
        .build()
}

pub(crate) fn default_client() -> Arc<dyn ProviderClient> {
    Arc::new(GeminiClient::new())
}
