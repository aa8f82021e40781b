//! JSON output formatting.

use anyhow::Result;
use clipsage_core::{PresetSlot, ProviderConfig};
use clipsage_providers::ProviderDescriptor;
use clipsage_store::Settings;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Configuration as shown by `config show`. API keys are masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub selected_provider: String,
    pub providers: Vec<ProviderConfigOutput>,
    pub presets: Vec<PresetOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

/// One provider's resolved configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigOutput {
    pub provider: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_model: Option<String>,
    pub models: Vec<String>,
}

/// One preset slot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOutput {
    pub slot: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ConfigOutput {
    /// Builds the output from settings and the resolved provider configs.
    pub fn new(settings: &Settings, providers: &[ProviderConfig]) -> Self {
        Self {
            selected_provider: settings.selected_provider.cli_name().to_string(),
            providers: providers
                .iter()
                .map(|c| ProviderConfigOutput {
                    provider: c.provider.cli_name().to_string(),
                    display_name: c.provider.display_name().to_string(),
                    api_key: c.api_key().map(mask_key),
                    current_model: c.current_model().map(str::to_string),
                    models: c.models.clone(),
                })
                .collect(),
            presets: PresetSlot::all()
                .iter()
                .map(|slot| PresetOutput {
                    slot: slot.number(),
                    text: settings.presets.get(*slot).map(str::to_string),
                })
                .collect(),
            custom_instructions: settings.custom_instructions.clone(),
        }
    }
}

/// Provider info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub id: String,
    pub display_name: String,
    pub selected: bool,
    pub key_configured: bool,
    pub supports_failover: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_model: Option<String>,
    pub models: Vec<String>,
    pub key_url: String,
}

impl ProviderInfoOutput {
    /// Builds the output for one registered provider.
    pub fn new(desc: &ProviderDescriptor, config: &ProviderConfig, selected: bool) -> Self {
        Self {
            id: desc.cli_name().to_string(),
            display_name: desc.display_name().to_string(),
            selected,
            key_configured: config.api_key().is_some(),
            supports_failover: desc.supports_failover,
            current_model: config.models.get(config.start_index()).cloned(),
            models: config.models.clone(),
            key_url: desc.key_url.to_string(),
        }
    }
}

/// Masks an API key, keeping four characters at each end.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
