//! Clipboard error types.

use thiserror::Error;

// ============================================================================
// Main Clipboard Error
// ============================================================================

/// Error type for clipboard operations.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No desktop session is reachable from this process.
    #[error("No active window found")]
    NoActiveContext,

    /// The emulated paste path could not produce text.
    #[error("Paste command failed. Try copying text again.")]
    PasteUnavailable,

    /// The emulated copy path could not store text.
    #[error("Cannot write to clipboard")]
    CopyUnavailable,

    /// The secondary context went away before answering.
    #[error("No response from clipboard context")]
    NoResponse,

    /// The secondary context answered with a failure.
    #[error("{0}")]
    SecondaryContext(String),

    /// The native clipboard backend reported an error.
    #[error("Clipboard backend error: {0}")]
    Backend(String),

    /// A clipboard utility could not be run.
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// The adapter has no strategies for the requested direction.
    #[error("No clipboard strategies configured")]
    NoStrategies,
}

impl ClipboardError {
    /// Returns true if this error means there is no desktop session.
    pub fn is_no_active_context(&self) -> bool {
        matches!(self, Self::NoActiveContext)
    }
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ClipboardError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Backend(format!("clipboard task failed: {err}"))
    }
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for subprocess execution.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found on PATH.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Command exited with a non-zero status.
    #[error("Command failed with exit code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// I/O error while spawning or talking to the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ClipboardError::PasteUnavailable.to_string(),
            "Paste command failed. Try copying text again."
        );
        assert_eq!(
            ClipboardError::CopyUnavailable.to_string(),
            "Cannot write to clipboard"
        );
        assert_eq!(
            ClipboardError::SecondaryContext("boom".to_string()).to_string(),
            "boom"
        );
    }

    #[test]
    fn test_process_error_converts() {
        let err: ClipboardError = ProcessError::NotFound("xclip".to_string()).into();
        assert!(err.to_string().contains("xclip"));
        assert!(!err.is_no_active_context());
        assert!(ClipboardError::NoActiveContext.is_no_active_context());
    }
}
