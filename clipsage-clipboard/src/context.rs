//! Active-context detection.
//!
//! An active context is a desktop session the process can reach. Without
//! one, direct clipboard access is not attempted and the processing
//! workflow reports "No active window found".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// ============================================================================
// Active Context
// ============================================================================

/// The windowing system behind an active context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Wayland compositor.
    Wayland,
    /// X11 server.
    X11,
    /// macOS window server.
    MacOs,
    /// Windows desktop.
    Windows,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wayland => "wayland",
            Self::X11 => "x11",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        };
        f.write_str(name)
    }
}

/// A reachable desktop session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveContext {
    /// Windowing system.
    pub kind: SessionKind,
    /// Display identifier, e.g. `wayland-0` or `:0`.
    pub display: String,
}

impl ActiveContext {
    /// Creates an active context.
    pub fn new(kind: SessionKind, display: impl Into<String>) -> Self {
        Self {
            kind,
            display: display.into(),
        }
    }
}

impl fmt::Display for ActiveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.display)
    }
}

// ============================================================================
// Probe Trait
// ============================================================================

/// Finds the active context, if there is one.
#[async_trait]
pub trait ContextProbe: Send + Sync {
    /// Returns the active context, or `None` when no session is reachable.
    async fn active_context(&self) -> Option<ActiveContext>;
}

// ============================================================================
// Desktop Session Probe
// ============================================================================

/// Probes the environment of the current process for a desktop session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopSessionProbe;

impl DesktopSessionProbe {
    /// Creates a new probe.
    pub fn new() -> Self {
        Self
    }

    /// Resolves a Unix session from `WAYLAND_DISPLAY` and `DISPLAY` values.
    ///
    /// Wayland wins when both are set. Blank values count as unset.
    pub fn from_unix_env(wayland: Option<&str>, display: Option<&str>) -> Option<ActiveContext> {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        if let Some(wl) = non_blank(wayland) {
            return Some(ActiveContext::new(SessionKind::Wayland, wl));
        }
        non_blank(display).map(|d| ActiveContext::new(SessionKind::X11, d))
    }
}

#[async_trait]
impl ContextProbe for DesktopSessionProbe {
    async fn active_context(&self) -> Option<ActiveContext> {
        let context = detect();
        debug!(context = ?context, "Probed desktop session");
        context
    }
}

#[cfg(target_os = "macos")]
fn detect() -> Option<ActiveContext> {
    Some(ActiveContext::new(SessionKind::MacOs, "console"))
}

#[cfg(target_os = "windows")]
fn detect() -> Option<ActiveContext> {
    Some(ActiveContext::new(SessionKind::Windows, "console"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn detect() -> Option<ActiveContext> {
    let wayland = std::env::var("WAYLAND_DISPLAY").ok();
    let display = std::env::var("DISPLAY").ok();
    DesktopSessionProbe::from_unix_env(wayland.as_deref(), display.as_deref())
}

// ============================================================================
// Fixed Probe
// ============================================================================

/// A probe that always reports the same answer.
///
/// Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedContextProbe(Option<ActiveContext>);

impl FixedContextProbe {
    /// A probe that always finds a session.
    pub fn present() -> Self {
        Self(Some(ActiveContext::new(SessionKind::X11, ":0")))
    }

    /// A probe that never finds a session.
    pub fn absent() -> Self {
        Self(None)
    }
}

#[async_trait]
impl ContextProbe for FixedContextProbe {
    async fn active_context(&self) -> Option<ActiveContext> {
        self.0.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wayland_preferred() {
        let ctx = DesktopSessionProbe::from_unix_env(Some("wayland-0"), Some(":0")).unwrap();
        assert_eq!(ctx.kind, SessionKind::Wayland);
        assert_eq!(ctx.to_string(), "wayland:wayland-0");
    }

    #[test]
    fn test_x11_fallback() {
        let ctx = DesktopSessionProbe::from_unix_env(Some("  "), Some(":1")).unwrap();
        assert_eq!(ctx, ActiveContext::new(SessionKind::X11, ":1"));
    }

    #[test]
    fn test_headless() {
        assert!(DesktopSessionProbe::from_unix_env(None, None).is_none());
        assert!(DesktopSessionProbe::from_unix_env(Some(""), Some("")).is_none());
    }

    #[tokio::test]
    async fn test_fixed_probe() {
        assert!(FixedContextProbe::present().active_context().await.is_some());
        assert!(FixedContextProbe::absent().active_context().await.is_none());
    }
}
