// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClipSage` Store
//!
//! Persisted state for `ClipSage`.
//!
//! This crate provides:
//!
//! - **SettingsStore**: User settings, implementing [`ConfigStore`](clipsage_core::ConfigStore)
//! - **ActivityLog**: The capped activity log, implementing [`ActivitySink`](clipsage_core::ActivitySink)
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use clipsage_store::{ActivityLog, SettingsStore};
//! use clipsage_core::ProviderId;
//!
//! let settings = SettingsStore::load_default().await;
//! settings.set_api_key(ProviderId::Gemini, "AIza...").await?;
//!
//! let log = ActivityLog::load_default().await;
//! for entry in log.recent(10).await {
//!     println!("{entry}");
//! }
//! ```

pub mod activity_log;
pub mod error;
pub mod persistence;
pub mod settings_store;

pub use activity_log::{ActivityLog, MAX_LOG_ENTRIES};
pub use error::StoreError;
pub use persistence::{
    CONFIG_DIR_ENV, default_activity_log_path, default_config_dir, default_settings_path,
    ensure_dir, load_json, load_json_or_default, save_json,
};
pub use settings_store::{
    EMPTY_API_KEY_MESSAGE, Presets, ProviderSettings, Settings, SettingsStore,
};

#[cfg(test)]
mod persistence_tests;
