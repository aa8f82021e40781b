//! CLI command implementations.

pub mod config;
pub mod log;
pub mod process;
pub mod providers;

use clap::builder::TypedValueParser;
use clipsage_core::{PresetSlot, ProviderId};

/// Parses a provider name or alias (`gemini`, `groq`, `primary`, ...).
pub(crate) fn provider_arg() -> impl TypedValueParser<Value = ProviderId> {
    clap::builder::StringValueParser::new().try_map(|s| s.parse::<ProviderId>())
}

/// Parses a preset slot (`1`..`3` or `preset1`..`preset3`).
pub(crate) fn preset_arg() -> impl TypedValueParser<Value = PresetSlot> {
    clap::builder::StringValueParser::new().try_map(|s| s.parse::<PresetSlot>())
}
