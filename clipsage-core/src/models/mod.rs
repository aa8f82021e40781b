//! Domain models for `ClipSage`.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider identity and per-invocation configuration
//! - [`processing`] - Model attempts and workflow results
//! - [`activity`] - Activity log entries
//! - [`preset`] - Named preset slots

mod activity;
mod preset;
mod processing;
mod provider;

pub use activity::{ActivityLogEntry, Severity, truncate_for_log};
pub use preset::PresetSlot;
pub use processing::{AttemptOutcome, ProcessingAttempt, ProcessingResult};
pub use provider::{ProviderConfig, ProviderId};
#[cfg(test)]
mod serde_tests;
