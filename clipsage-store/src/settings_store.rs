//! User settings store.
//!
//! Holds the selected provider, per-provider keys and models, the three
//! presets and the custom instruction suffix. Every setter writes the file
//! straight away, so separate invocations always see each other's changes.

use async_trait::async_trait;
use clipsage_core::{ConfigStore, CoreError, PresetSlot, ProviderConfig, ProviderId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Message shown when an empty API key is submitted.
pub const EMPTY_API_KEY_MESSAGE: &str = "Please enter an API key";

// ============================================================================
// Settings Types
// ============================================================================

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Provider used by the clipboard workflow.
    pub selected_provider: ProviderId,

    /// Per-provider settings.
    pub providers: HashMap<ProviderId, ProviderSettings>,

    /// Preset texts.
    pub presets: Presets,

    /// Suffix appended to the system prompt.
    pub custom_instructions: Option<String>,
}

impl Settings {
    /// Returns the settings for a provider, or the empty default.
    pub fn provider(&self, provider: ProviderId) -> ProviderSettings {
        self.providers.get(&provider).cloned().unwrap_or_default()
    }

    fn provider_mut(&mut self, provider: ProviderId) -> &mut ProviderSettings {
        self.providers.entry(provider).or_default()
    }

    /// Builds the configuration the failover walk runs with.
    pub fn provider_config(&self, provider: ProviderId) -> ProviderConfig {
        let stored = self.provider(provider);

        let mut config = ProviderConfig::new(provider).with_models(stored.models.iter().cloned());
        if let Some(key) = stored.api_key {
            config = config.with_api_key(key);
        }
        if let Some(model) = stored.model.as_deref() {
            config = config.with_current_model(model);
        }
        if let Some(custom) = self.custom_instructions.as_deref() {
            config = config.with_custom_instructions(custom);
        }
        config
    }
}

/// Per-provider settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderSettings {
    /// API key.
    pub api_key: Option<String>,

    /// Name of the current (sticky) model.
    pub model: Option<String>,

    /// Model list override. Empty means the built-in list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
}

/// The three preset strings, keyed like the slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    /// First preset.
    pub preset1: Option<String>,
    /// Second preset.
    pub preset2: Option<String>,
    /// Third preset.
    pub preset3: Option<String>,
}

impl Presets {
    /// Returns the text of a slot, if set and non-empty.
    pub fn get(&self, slot: PresetSlot) -> Option<&str> {
        self.slot(slot).as_deref().filter(|t| !t.is_empty())
    }

    /// Sets or clears a slot.
    pub fn set(&mut self, slot: PresetSlot, text: Option<String>) {
        *self.slot_mut(slot) = text;
    }

    fn slot(&self, slot: PresetSlot) -> &Option<String> {
        match slot.number() {
            1 => &self.preset1,
            2 => &self.preset2,
            _ => &self.preset3,
        }
    }

    fn slot_mut(&mut self, slot: PresetSlot) -> &mut Option<String> {
        match slot.number() {
            1 => &mut self.preset1,
            2 => &mut self.preset2,
            _ => &mut self.preset3,
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store.
#[derive(Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store with default settings, backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path. Missing or corrupt files yield defaults.
    pub async fn load(path: PathBuf) -> Self {
        let settings: Settings = load_json_or_default(&path).await;
        debug!(path = %path.display(), provider = %settings.selected_provider, "Settings loaded");
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Applies `f` and writes the result to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings),
    {
        let snapshot = {
            let mut settings = self.settings.write().await;
            f(&mut settings);
            settings.clone()
        };
        save_json(&self.path, &snapshot).await
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await.clone();
        save_json(&self.path, &settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    // ========================================================================
    // Provider Selection
    // ========================================================================

    /// Sets the provider used by the workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn set_selected_provider(&self, provider: ProviderId) -> Result<(), StoreError> {
        self.update(|s| s.selected_provider = provider).await?;
        info!(provider = %provider, "Selected provider changed");
        Ok(())
    }

    // ========================================================================
    // Keys and Models
    // ========================================================================

    /// Returns the stored API key for a provider.
    pub async fn api_key(&self, provider: ProviderId) -> Option<String> {
        self.settings.read().await.provider(provider).api_key
    }

    /// Stores an API key. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] for an empty key, or an error if
    /// the settings cannot be written.
    pub async fn set_api_key(&self, provider: ProviderId, key: &str) -> Result<(), StoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StoreError::InvalidInput(EMPTY_API_KEY_MESSAGE.to_string()));
        }
        self.update(|s| s.provider_mut(provider).api_key = Some(key.to_string()))
            .await?;
        info!(provider = %provider, "API key saved");
        Ok(())
    }

    /// Returns the stored current model name for a provider.
    pub async fn model(&self, provider: ProviderId) -> Option<String> {
        self.settings.read().await.provider(provider).model
    }

    /// Stores the current model name for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn set_model(&self, provider: ProviderId, model: &str) -> Result<(), StoreError> {
        self.update(|s| s.provider_mut(provider).model = Some(model.to_string()))
            .await
    }

    /// Replaces the model list override. An empty list restores the
    /// built-in list.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn set_models(&self, provider: ProviderId, models: Vec<String>) -> Result<(), StoreError> {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        self.update(|s| s.provider_mut(provider).models = models).await
    }

    // ========================================================================
    // Presets and Instructions
    // ========================================================================

    /// Stores or clears a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn set_preset(&self, slot: PresetSlot, text: Option<String>) -> Result<(), StoreError> {
        self.update(|s| s.presets.set(slot, text)).await
    }

    /// Stores or clears the custom instructions.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn set_custom_instructions(&self, text: Option<String>) -> Result<(), StoreError> {
        let text = text.filter(|t| !t.trim().is_empty());
        self.update(|s| s.custom_instructions = text).await
    }

    /// Restores every setting to its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.update(|s| *s = Settings::default()).await?;
        info!(path = %self.path.display(), "Settings reset");
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for SettingsStore {
    async fn selected_provider(&self) -> ProviderId {
        self.settings.read().await.selected_provider
    }

    async fn provider_config(&self, provider: ProviderId) -> ProviderConfig {
        self.settings.read().await.provider_config(provider)
    }

    #[instrument(skip(self))]
    async fn set_current_model(&self, provider: ProviderId, model: &str) -> Result<(), CoreError> {
        self.set_model(provider, model).await.map_err(CoreError::from)
    }

    async fn preset(&self, slot: PresetSlot) -> Option<String> {
        self.settings
            .read()
            .await
            .presets
            .get(slot)
            .map(str::to_string)
    }
}

// ============================================================================
// Tests
// ============================================================================
