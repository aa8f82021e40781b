//! Trigger sources.
//!
//! Every way of starting a workflow is a [`Trigger`]. The dispatch point is
//! [`ClipboardWorkflow::handle`](crate::ClipboardWorkflow::handle).

use clipsage_core::PresetSlot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What started a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trigger", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    /// The process-clipboard shortcut.
    ProcessClipboard,
    /// A manual test run from the settings surface.
    Manual,
    /// A preset shortcut.
    Preset(PresetSlot),
    /// Word count over a text selection.
    CountWords(String),
}

impl Trigger {
    /// Returns the activity log line recorded when the trigger fires.
    ///
    /// Word counts log their own progress and record nothing here.
    pub fn activity_message(&self) -> Option<String> {
        match self {
            Self::ProcessClipboard => Some("Process shortcut pressed".to_string()),
            Self::Manual => Some("Manual test triggered".to_string()),
            Self::Preset(slot) => Some(format!("Preset {} shortcut pressed", slot.number())),
            Self::CountWords(_) => None,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessClipboard => f.write_str("process-clipboard"),
            Self::Manual => f.write_str("manual"),
            Self::Preset(slot) => write!(f, "preset-{}", slot.number()),
            Self::CountWords(_) => f.write_str("count-words"),
        }
    }
}
