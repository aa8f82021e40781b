//! Native clipboard access through `arboard`.
//!
//! `arboard` is synchronous, so every call runs under
//! [`tokio::task::spawn_blocking`].
//!
//! - [`ActiveContextClipboard`] - direct access, gated on an active session
//! - [`ModernClipboard`] - a clipboard handle owned by the secondary context
//!
//! X11 and Wayland serve clipboard contents from the process that set them.
//! Writes there keep serving the selection until a clipboard manager or
//! another program takes ownership, bounded by a handoff window, so the
//! text survives this process exiting.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use crate::context::ContextProbe;
use crate::error::ClipboardError;
use crate::strategy::{AccessKind, ClipboardReader, ClipboardWriter};

fn read_from(clipboard: &mut arboard::Clipboard) -> Result<String, ClipboardError> {
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        // Empty clipboard, or non-text content only.
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Default time a Linux write waits for another owner to take the selection.
pub const SELECTION_HANDOFF: Duration = Duration::from_secs(5);

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn write_to(
    clipboard: &mut arboard::Clipboard,
    text: String,
    handoff: Duration,
) -> Result<(), ClipboardError> {
    use arboard::SetExtLinux;

    debug!(handoff = ?handoff, "Serving selection until handed off");
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + handoff)
        .text(text)?;
    Ok(())
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn write_to(
    clipboard: &mut arboard::Clipboard,
    text: String,
    _handoff: Duration,
) -> Result<(), ClipboardError> {
    clipboard.set_text(text)?;
    Ok(())
}

// ============================================================================
// Active Context Clipboard
// ============================================================================

/// Direct clipboard access from the calling task.
///
/// Refuses to run without an active context so that headless callers fall
/// through to the secondary context instead of hanging on a missing display.
pub struct ActiveContextClipboard {
    probe: Arc<dyn ContextProbe>,
    handoff: Duration,
}

impl ActiveContextClipboard {
    /// Creates a direct clipboard gated on `probe`.
    pub fn new(probe: Arc<dyn ContextProbe>) -> Self {
        Self {
            probe,
            handoff: SELECTION_HANDOFF,
        }
    }

    /// Overrides the selection handoff window.
    #[must_use]
    pub fn with_handoff(mut self, handoff: Duration) -> Self {
        self.handoff = handoff;
        self
    }

    /// Returns the selection handoff window.
    pub fn handoff(&self) -> Duration {
        self.handoff
    }

    async fn require_context(&self) -> Result<(), ClipboardError> {
        match self.probe.active_context().await {
            Some(ctx) => {
                debug!(context = %ctx, "Active context found");
                Ok(())
            }
            None => Err(ClipboardError::NoActiveContext),
        }
    }
}

#[async_trait]
impl ClipboardReader for ActiveContextClipboard {
    fn id(&self) -> &str {
        "active.read"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::ActiveContext
    }

    async fn read(&self) -> Result<String, ClipboardError> {
        self.require_context().await?;
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()?;
            read_from(&mut clipboard)
        })
        .await?
    }
}

#[async_trait]
impl ClipboardWriter for ActiveContextClipboard {
    fn id(&self) -> &str {
        "active.write"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::ActiveContext
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        self.require_context().await?;
        let text = text.to_string();
        let handoff = self.handoff;
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()?;
            write_to(&mut clipboard, text, handoff)
        })
        .await?
    }
}

// ============================================================================
// Modern Clipboard
// ============================================================================

/// A long-lived `arboard` handle.
///
/// The handle is created lazily and then kept for as long as this value
/// lives; writes use the same handoff window as [`ActiveContextClipboard`].
#[derive(Clone)]
pub struct ModernClipboard {
    handle: Arc<Mutex<Option<arboard::Clipboard>>>,
    handoff: Duration,
}

impl ModernClipboard {
    /// Creates a clipboard whose handle is opened on first use.
    pub fn new() -> Self {
        Self {
            handle: Arc::new(Mutex::new(None)),
            handoff: SELECTION_HANDOFF,
        }
    }

    /// Overrides the selection handoff window.
    #[must_use]
    pub fn with_handoff(mut self, handoff: Duration) -> Self {
        self.handoff = handoff;
        self
    }

    async fn with_handle<T, F>(&self, f: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&mut arboard::Clipboard) -> Result<T, ClipboardError> + Send + 'static,
    {
        let handle = Arc::clone(&self.handle);
        tokio::task::spawn_blocking(move || {
            let mut guard = handle
                .lock()
                .map_err(|_| ClipboardError::Backend("clipboard handle poisoned".to_string()))?;
            if guard.is_none() {
                *guard = Some(arboard::Clipboard::new()?);
            }
            match guard.as_mut() {
                Some(clipboard) => f(clipboard),
                None => Err(ClipboardError::Backend("clipboard handle missing".to_string())),
            }
        })
        .await?
    }
}

#[async_trait]
impl ClipboardReader for ModernClipboard {
    fn id(&self) -> &str {
        "modern.read"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::Modern
    }

    async fn read(&self) -> Result<String, ClipboardError> {
        self.with_handle(read_from).await
    }
}

#[async_trait]
impl ClipboardWriter for ModernClipboard {
    fn id(&self) -> &str {
        "modern.write"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::Modern
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        let handoff = self.handoff;
        self.with_handle(move |clipboard| write_to(clipboard, text, handoff))
            .await
    }
}

impl Default for ModernClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixedContextProbe;

    #[tokio::test]
    async fn test_active_context_required_for_read() {
        let clipboard = ActiveContextClipboard::new(Arc::new(FixedContextProbe::absent()));
        let err = clipboard.read().await.unwrap_err();
        assert!(err.is_no_active_context());
    }

    #[tokio::test]
    async fn test_active_context_required_for_write() {
        let clipboard = ActiveContextClipboard::new(Arc::new(FixedContextProbe::absent()));
        let err = clipboard.write("text").await.unwrap_err();
        assert!(err.is_no_active_context());
    }

    #[test]
    fn test_writes_hand_off_selection_by_default() {
        let clipboard = ActiveContextClipboard::new(Arc::new(FixedContextProbe::absent()));
        assert_eq!(clipboard.handoff(), SELECTION_HANDOFF);
        assert!(SELECTION_HANDOFF > Duration::ZERO);

        let quick = clipboard.with_handoff(Duration::from_millis(200));
        assert_eq!(quick.handoff(), Duration::from_millis(200));
    }
}
