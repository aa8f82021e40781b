//! Groq provider.
//!
//! Groq is the secondary provider. It runs a single model and makes exactly
//! one attempt per invocation; failures are returned as they are.

mod api;

pub use api::{ChatResponse, GROQ_API_BASE, GroqClient};

use clipsage_core::ProviderId;
use std::sync::Arc;

use crate::client::ProviderClient;
use crate::descriptor::ProviderDescriptor;

/// Creates the Groq provider descriptor.
pub fn groq_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::builder(ProviderId::Groq)
        .api_base(GROQ_API_BASE)
        .key_url("https://console.groq.com/keys")
        .supports_failover(false)
        .build_client(default_client)
        .build()
}

pub(crate) fn default_client() -> Arc<dyn ProviderClient> {
    Arc::new(GroqClient::new())
}
