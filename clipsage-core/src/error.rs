//! Core error types for `ClipSage`.

use thiserror::Error;

/// Core error type for `ClipSage` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown provider identifier.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Preset slot outside the supported range.
    #[error("Invalid preset slot: {0} (expected 1-3)")]
    InvalidPreset(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be persisted.
    #[error("Failed to persist configuration: {0}")]
    Persistence(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
