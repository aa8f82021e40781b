//! Provider-related types.
//!
//! This module contains types related to the AI vendors:
//! - [`ProviderId`] - Enum of supported vendors
//! - [`ProviderConfig`] - Configuration read at the start of each invocation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Default Models
// ============================================================================

/// Gemini model priority: cheapest / highest throughput first.
const GEMINI_MODELS: &[&str] = &[
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
    "gemini-2.0-flash-exp",
    "gemini-2.5-pro",
    "gemini-3-pro-preview",
];

/// Groq runs a single model.
const GROQ_MODELS: &[&str] = &["openai/gpt-oss-120b"];

// ============================================================================
// Provider Id
// ============================================================================

/// Supported AI vendors.
///
/// Gemini is the primary, multi-model provider; Groq is the secondary,
/// single-model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Google Gemini (primary)
    #[default]
    Gemini,
    /// Groq (secondary)
    Groq,
}

impl ProviderId {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Groq => "Groq",
        }
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
        }
    }

    /// Returns all available providers.
    pub fn all() -> &'static [ProviderId] {
        &[Self::Gemini, Self::Groq]
    }

    /// Returns the built-in model list, in priority order.
    pub fn default_models(&self) -> &'static [&'static str] {
        match self {
            Self::Gemini => GEMINI_MODELS,
            Self::Groq => GROQ_MODELS,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ProviderId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "primary" | "google" => Ok(Self::Gemini),
            "groq" | "secondary" => Ok(Self::Groq),
            other => Err(CoreError::UnknownProvider(other.to_string())),
        }
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Provider configuration for one workflow invocation.
///
/// Built from persisted settings at the start of every invocation and
/// discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which vendor to call.
    pub provider: ProviderId,
    /// API key, if configured.
    pub api_key: Option<String>,
    /// Models in priority order. Never empty.
    pub models: Vec<String>,
    /// Index of the current (sticky) model. May be out of range.
    pub current_model_index: usize,
    /// Suffix appended to the system prompt.
    pub custom_instructions: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration with the provider's built-in model list.
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            api_key: None,
            models: provider
                .default_models()
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            current_model_index: 0,
            custom_instructions: None,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Replaces the model list. An empty list keeps the current one.
    #[must_use]
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let models: Vec<String> = models.into_iter().map(Into::into).collect();
        if !models.is_empty() {
            self.models = models;
        }
        self
    }

    /// Points the current index at a stored model name.
    ///
    /// A name that is not in the model list leaves the index out of range,
    /// so [`start_index`](Self::start_index) normalizes it to 0 and
    /// [`current_model`](Self::current_model) reports nothing.
    #[must_use]
    pub fn with_current_model(mut self, model: &str) -> Self {
        self.current_model_index = self
            .models
            .iter()
            .position(|m| m == model)
            .unwrap_or(self.models.len());
        self
    }

    /// Sets the custom instruction suffix.
    #[must_use]
    pub fn with_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    /// Returns the index to start the failover walk from.
    pub fn start_index(&self) -> usize {
        if self.current_model_index < self.models.len() {
            self.current_model_index
        } else {
            0
        }
    }

    /// Returns the stored current model, if the index is valid.
    pub fn current_model(&self) -> Option<&str> {
        self.models.get(self.current_model_index).map(String::as_str)
    }

    /// Returns the API key if it is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Returns the custom instructions if set and not blank.
    pub fn custom_instructions(&self) -> Option<&str> {
        self.custom_instructions
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("gemini".parse::<ProviderId>().unwrap(), ProviderId::Gemini);
        assert_eq!("Primary".parse::<ProviderId>().unwrap(), ProviderId::Gemini);
        assert_eq!("GROQ".parse::<ProviderId>().unwrap(), ProviderId::Groq);
        assert_eq!("secondary".parse::<ProviderId>().unwrap(), ProviderId::Groq);
        assert!("openai".parse::<ProviderId>().is_err());
    }

    #[test]
    fn test_default_model_lists() {
        assert_eq!(ProviderId::Gemini.default_models().len(), 6);
        assert_eq!(ProviderId::Gemini.default_models()[0], "gemini-2.5-flash-lite");
        assert_eq!(ProviderId::Groq.default_models(), &["openai/gpt-oss-120b"]);
    }

    #[test]
    fn test_start_index_normalizes_out_of_range() {
        let mut config = ProviderConfig::new(ProviderId::Gemini);
        config.current_model_index = 2;
        assert_eq!(config.start_index(), 2);

        config.current_model_index = 99;
        assert_eq!(config.start_index(), 0);
        assert_eq!(config.current_model(), None);
    }

    #[test]
    fn test_with_current_model() {
        let config = ProviderConfig::new(ProviderId::Gemini)
            .with_models(["m1", "m2", "m3"])
            .with_current_model("m2");
        assert_eq!(config.start_index(), 1);
        assert_eq!(config.current_model(), Some("m2"));

        let unknown = config.clone().with_current_model("retired-model");
        assert_eq!(unknown.start_index(), 0);
        assert_eq!(unknown.current_model(), None);
    }

    #[test]
    fn test_with_models_ignores_empty_list() {
        let config = ProviderConfig::new(ProviderId::Groq).with_models(Vec::<String>::new());
        assert_eq!(config.models, vec!["openai/gpt-oss-120b".to_string()]);
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = ProviderConfig::new(ProviderId::Groq).with_api_key("   ");
        assert_eq!(config.api_key(), None);

        let config = config.with_api_key("gsk_live");
        assert_eq!(config.api_key(), Some("gsk_live"));
    }

    #[test]
    fn test_blank_custom_instructions_are_ignored() {
        let config = ProviderConfig::new(ProviderId::Gemini).with_custom_instructions("  ");
        assert_eq!(config.custom_instructions(), None);
    }
}
