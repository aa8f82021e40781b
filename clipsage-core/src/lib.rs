// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClipSage` Core
//!
//! Core types, models, and traits for the `ClipSage` clipboard assistant.
//!
//! This crate provides the foundational abstractions used across all other
//! `ClipSage` crates, including:
//!
//! - Domain models (providers, processing attempts, activity log entries)
//! - Error types
//! - Seam traits for configuration and activity logging
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`ProviderId`] - The two supported AI vendors
//! - [`ProviderConfig`] - Per-invocation provider configuration
//!
//! ### Processing Types
//! - [`ProcessingAttempt`] - One model attempt inside a failover run
//! - [`AttemptOutcome`] - Success, rate-limited, or fatal
//! - [`ProcessingResult`] - The single observable outcome of a workflow
//!
//! ### Activity Log
//! - [`ActivityLogEntry`] - One user-facing log line
//! - [`Severity`] - Info, success, or error
//!
//! ### Presets
//! - [`PresetSlot`] - One of the three named preset strings

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Activity log
    ActivityLogEntry,
    Severity,
    // Processing
    AttemptOutcome,
    ProcessingAttempt,
    ProcessingResult,
    // Presets
    PresetSlot,
    // Provider types
    ProviderConfig,
    ProviderId,
    // Helpers
    truncate_for_log,
};

// Re-export traits
pub use traits::{ActivitySink, ConfigStore, NullActivitySink};
