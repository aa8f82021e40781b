//! Clipboard strategy traits and types.
//!
//! A strategy is one way of reaching the system clipboard. The adapter holds
//! an ordered list of readers and writers and tries them in turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ClipboardError;

// ============================================================================
// Access Kind
// ============================================================================

/// The mechanism a strategy uses to reach the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    /// Direct access from the calling task, gated on an active session.
    ActiveContext,
    /// Delegated to the long-lived secondary context worker.
    SecondaryContext,
    /// Native clipboard API owned by the secondary context.
    Modern,
    /// Platform clipboard utilities run as child processes.
    Emulated,
}

impl AccessKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ActiveContext => "Active Context",
            Self::SecondaryContext => "Secondary Context",
            Self::Modern => "Modern",
            Self::Emulated => "Emulated",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Strategy Traits
// ============================================================================

/// A way of reading text from the clipboard.
///
/// ## Implementing a Reader
///
/// ```ignore
/// struct FixedReader;
///
/// #[async_trait]
/// impl ClipboardReader for FixedReader {
///     fn id(&self) -> &str {
///         "fixed"
///     }
///
///     fn kind(&self) -> AccessKind {
///         AccessKind::Modern
///     }
///
///     async fn read(&self) -> Result<String, ClipboardError> {
///         Ok("hello".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ClipboardReader: Send + Sync {
    /// Unique identifier for this strategy (e.g., "secondary.read").
    fn id(&self) -> &str;

    /// The mechanism this strategy uses.
    fn kind(&self) -> AccessKind;

    /// Reads the current clipboard text.
    async fn read(&self) -> Result<String, ClipboardError>;
}

/// A way of writing text to the clipboard.
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    /// Unique identifier for this strategy (e.g., "emulated.write").
    fn id(&self) -> &str;

    /// The mechanism this strategy uses.
    fn kind(&self) -> AccessKind;

    /// Replaces the clipboard contents with `text`.
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

// ============================================================================
// Tests
// ============================================================================
