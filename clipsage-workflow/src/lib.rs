// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ClipSage` Workflow
//!
//! The user-facing workflows of `ClipSage`, wired from the clipboard
//! adapter, the configuration store, the activity log and the provider
//! failover walk.
//!
//! - **Process clipboard**: read, ask the selected provider, write the answer
//! - **Copy preset**: write one of three stored texts verbatim
//! - **Count words**: write `Words: {n}` for a selection
//!
//! ## Usage
//!
//! ```ignore
//! use clipsage_workflow::{ClipboardWorkflow, Trigger};
//!
//! let workflow = ClipboardWorkflow::new(clipboard, probe, store, activity);
//! let result = workflow.handle(Trigger::ProcessClipboard).await;
//! println!("{}", result.clipboard_text());
//! ```

pub mod error;
pub mod trigger;
pub mod workflow;

pub use error::WorkflowError;
pub use trigger::Trigger;
pub use workflow::ClipboardWorkflow;
