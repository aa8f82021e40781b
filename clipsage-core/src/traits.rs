//! Trait definitions for `ClipSage`.
//!
//! These are the seams between the processing pipeline and its external
//! collaborators: persisted configuration and the activity log.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::{ActivityLogEntry, PresetSlot, ProviderConfig, ProviderId};

/// Read/write access to persisted user configuration.
///
/// The pipeline never holds configuration in process-wide state: each
/// workflow invocation reads a fresh [`ProviderConfig`] through this trait,
/// and the failover orchestrator writes the sticky model back through it.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns the provider selected by the user.
    async fn selected_provider(&self) -> ProviderId;

    /// Returns the resolved configuration for a provider.
    ///
    /// The returned `current_model_index` may be out of range; callers use
    /// [`ProviderConfig::start_index`] to normalize it.
    async fn provider_config(&self, provider: ProviderId) -> ProviderConfig;

    /// Persists `model` as the provider's current model.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    async fn set_current_model(&self, provider: ProviderId, model: &str) -> Result<(), CoreError>;

    /// Returns the text stored in a preset slot, if any.
    async fn preset(&self, slot: PresetSlot) -> Option<String>;
}

/// Append-only destination for activity log entries.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Appends an entry.
    async fn record(&self, entry: ActivityLogEntry);

    /// Appends an info entry.
    async fn info(&self, message: &str) {
        self.record(ActivityLogEntry::info(message)).await;
    }

    /// Appends a success entry.
    async fn success(&self, message: &str) {
        self.record(ActivityLogEntry::success(message)).await;
    }

    /// Appends an error entry.
    async fn error(&self, message: &str) {
        self.record(ActivityLogEntry::error(message)).await;
    }
}

/// Activity sink that discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActivitySink;

#[async_trait]
impl ActivitySink for NullActivitySink {
    async fn record(&self, _entry: ActivityLogEntry) {}
}
