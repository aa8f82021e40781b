//! Provider registry for looking up provider descriptors.
//!
//! The registry provides static access to both provider configurations
//! and is the central point for resolving CLI names and clients.

use clipsage_core::ProviderId;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::descriptor::ProviderDescriptor;
use crate::gemini::gemini_descriptor;
use crate::groq::groq_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Static storage for CLI name to provider mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, ProviderId>> = OnceLock::new();

/// Initializes all provider descriptors, primary first.
fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![gemini_descriptor(), groq_descriptor()]
}

fn build_cli_name_map(descriptors: &[ProviderDescriptor]) -> HashMap<String, ProviderId> {
    descriptors
        .iter()
        .map(|d| (d.cli_name().to_string(), d.id))
        .collect()
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of provider descriptors.
///
/// Initialized lazily on first access.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by id.
    pub fn get(id: ProviderId) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the CLI name to provider mapping.
    pub fn cli_name_map() -> &'static HashMap<String, ProviderId> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a provider by CLI name.
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        let id = Self::cli_name_map().get(name)?;
        Self::get(*id)
    }

    /// Returns whether `id` walks its model list on rate limits.
    pub fn supports_failover(id: ProviderId) -> bool {
        Self::get(id).is_some_and(|d| d.supports_failover)
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }
}

// ============================================================================
// Tests
// ============================================================================
