//! Activity log entries.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Progress information.
    #[default]
    Info,
    /// A completed operation.
    Success,
    /// A failure.
    Error,
}

impl Severity {
    /// Returns a short uppercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One user-facing line in the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    /// Message text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

impl ActivityLogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
            severity,
        }
    }

    /// Creates an info entry.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Creates a success entry.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    /// Creates an error entry.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

impl fmt::Display for ActivityLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:<5} {}", self.timestamp, self.severity.label(), self.message)
    }
}

/// Truncates `text` to at most `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let entry = ActivityLogEntry::info("Processing with m1...");
        assert_eq!(entry.timestamp.len(), 8);
        assert_eq!(entry.timestamp.as_bytes()[2], b':');
        assert_eq!(entry.timestamp.as_bytes()[5], b':');
    }

    #[test]
    fn test_display() {
        let entry = ActivityLogEntry {
            timestamp: "09:15:02".to_string(),
            message: "Done".to_string(),
            severity: Severity::Success,
        };
        assert_eq!(entry.to_string(), "[09:15:02] OK    Done");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 120), "short");
        assert_eq!(truncate_for_log(&"x".repeat(200), 120).len(), 120);
        assert_eq!(truncate_for_log("héllo wörld", 4), "héll");
        assert_eq!(truncate_for_log("", 10), "");
    }
}
