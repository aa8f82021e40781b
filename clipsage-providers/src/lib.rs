// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClipSage` Providers
//!
//! AI vendor clients and model failover for `ClipSage`.
//!
//! Each provider module includes:
//!
//! - **Descriptor**: Static configuration (endpoint, key page, failover policy)
//! - **Client**: A [`ProviderClient`] for the vendor's HTTP API
//!
//! ## Supported Providers
//!
//! | Provider | Models | Failover | Auth |
//! |----------|--------|----------|------|
//! | Gemini (Google) | 6 | ✅ | `key` query parameter |
//! | Groq | 1 | ❌ | Bearer token |
//!
//! ## Usage
//!
//! ```ignore
//! use clipsage_providers::FailoverOrchestrator;
//!
//! let orchestrator = FailoverOrchestrator::new(store, activity);
//! let report = orchestrator.process("What is 2 + 2?").await?;
//! println!("{} answered: {}", report.model, report.text);
//! ```

pub mod client;
pub mod descriptor;
pub mod error;
pub mod failover;
pub mod prompt;
pub mod registry;

// Provider modules
pub mod gemini;
pub mod groq;

// Re-export key types
pub use client::ProviderClient;
pub use descriptor::{ProviderDescriptor, ProviderDescriptorBuilder};
pub use error::{ProviderError, Result, is_rate_limit_message};
pub use failover::{FailoverOrchestrator, FailoverReport};
pub use prompt::{BASE_SYSTEM_PROMPT, system_prompt};
pub use registry::ProviderRegistry;

// Re-export provider descriptors and clients
pub use gemini::{GEMINI_API_BASE, GeminiClient, gemini_descriptor};
pub use groq::{GROQ_API_BASE, GroqClient, groq_descriptor};
