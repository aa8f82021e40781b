//! Workflow error types.

use clipsage_clipboard::ClipboardError;
use clipsage_core::PresetSlot;
use clipsage_providers::ProviderError;
use thiserror::Error;

/// Why a workflow stopped.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No desktop session is reachable.
    #[error("No active window found")]
    NoActiveContext,

    /// Every clipboard read strategy failed.
    #[error("Could not read clipboard - {0}")]
    ClipboardUnavailable(#[source] ClipboardError),

    /// The clipboard holds no text, or only whitespace.
    #[error("Clipboard is empty")]
    EmptyClipboard,

    /// The provider walk failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Every clipboard write strategy failed.
    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(#[source] ClipboardError),

    /// The preset slot holds no text.
    #[error("Preset {} is empty", .0.number())]
    PresetEmpty(PresetSlot),
}

impl WorkflowError {
    /// Returns the text written to the clipboard to report this error.
    ///
    /// Errors that happen while writing have nothing to write.
    pub fn clipboard_message(&self) -> Option<String> {
        match self {
            Self::ClipboardWrite(_) | Self::PresetEmpty(_) => None,
            other => Some(format!("Error: {other}")),
        }
    }

    /// Returns the activity log line for this error, with the full message.
    pub fn activity_message(&self) -> String {
        match self {
            Self::ClipboardUnavailable(e) => format!("Clipboard read failed: {e}"),
            Self::Provider(e) => format!("AI API failed: {e}"),
            other => other.to_string(),
        }
    }
}
