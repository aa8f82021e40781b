// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClipSage` Clipboard
//!
//! Clipboard access for `ClipSage`.
//!
//! Reading and writing go through a cascade of strategies, tried in order
//! until one succeeds:
//!
//! 1. [`ActiveContextClipboard`] - direct access while a desktop session
//!    is reachable
//! 2. [`SecondaryContextClipboard`] - a long-lived worker task that tries
//!    its own native handle ([`ModernClipboard`]) and then platform
//!    utilities ([`EmulatedClipboard`])
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use clipsage_clipboard::{ClipboardAdapter, DesktopSessionProbe};
//!
//! let adapter = ClipboardAdapter::desktop(Arc::new(DesktopSessionProbe::new()));
//! adapter.write_text("hello").await?;
//! assert_eq!(adapter.read_text().await?, "hello");
//! ```

pub mod adapter;
pub mod context;
pub mod error;
pub mod host;
pub mod secondary;
pub mod strategy;

// Errors
pub use error::{ClipboardError, ProcessError};

// Host backends
pub use host::{
    ActiveContextClipboard, ClipboardCommand, EmulatedClipboard, ModernClipboard, ProcessOutput,
    ProcessRunner,
};

// Strategy & adapter
pub use adapter::{AccessAttempt, AccessOutcome, ClipboardAdapter};
pub use context::{ActiveContext, ContextProbe, DesktopSessionProbe, FixedContextProbe, SessionKind};
pub use secondary::{
    ClipboardRequest, ClipboardResponse, SecondaryContext, SecondaryContextClipboard,
    SecondaryContextLauncher,
};
pub use strategy::{AccessKind, ClipboardReader, ClipboardWriter};
