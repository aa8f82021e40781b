//! Provider descriptor system.
//!
//! A descriptor holds the static configuration for a provider:
//! - Identity and display names
//! - API base URL and where to obtain a key
//! - Failover policy
//! - How to build its client

use clipsage_core::ProviderId;
use std::fmt;
use std::sync::Arc;

use crate::client::ProviderClient;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a provider.
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub id: ProviderId,
    /// Default API base URL.
    pub api_base: &'static str,
    /// Page where users create an API key.
    pub key_url: &'static str,
    /// Whether a rate-limited model falls over to the next one.
    pub supports_failover: bool,
    /// Builds the client for the public endpoint.
    pub build_client: fn() -> Arc<dyn ProviderClient>,
}

impl ProviderDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
        ProviderDescriptorBuilder::new(id)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &'static str {
        self.id.cli_name()
    }

    /// Returns the built-in model list.
    pub fn default_models(&self) -> &'static [&'static str] {
        self.id.default_models()
    }

    /// Builds a client for this provider.
    pub fn client(&self) -> Arc<dyn ProviderClient> {
        (self.build_client)()
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("api_base", &self.api_base)
            .field("supports_failover", &self.supports_failover)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ProviderDescriptor`].
pub struct ProviderDescriptorBuilder {
    id: ProviderId,
    api_base: &'static str,
    key_url: &'static str,
    supports_failover: bool,
    build_client: Option<fn() -> Arc<dyn ProviderClient>>,
}

impl ProviderDescriptorBuilder {
    /// Creates a new builder for the given provider.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            api_base: "",
            key_url: "",
            supports_failover: false,
            build_client: None,
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_base(mut self, base: &'static str) -> Self {
        self.api_base = base;
        self
    }

    /// Sets the API key page.
    #[must_use]
    pub fn key_url(mut self, url: &'static str) -> Self {
        self.key_url = url;
        self
    }

    /// Sets the failover policy.
    #[must_use]
    pub fn supports_failover(mut self, enabled: bool) -> Self {
        self.supports_failover = enabled;
        self
    }

    /// Sets the client constructor.
    #[must_use]
    pub fn build_client(mut self, build: fn() -> Arc<dyn ProviderClient>) -> Self {
        self.build_client = Some(build);
        self
    }

    /// Builds the descriptor.
    ///
    /// Without a client constructor, the descriptor falls back to the
    /// vendor's default client.
    pub fn build(self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id,
            api_base: self.api_base,
            key_url: self.key_url,
            supports_failover: self.supports_failover,
            build_client: self.build_client.unwrap_or(match self.id {
                ProviderId::Gemini => crate::gemini::default_client,
                ProviderId::Groq => crate::groq::default_client,
            }),
        }
    }
}
