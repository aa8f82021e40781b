//! Processing types.
//!
//! - [`ProcessingAttempt`] - One model call inside a failover run
//! - [`AttemptOutcome`] - How that call ended
//! - [`ProcessingResult`] - The single outcome of a workflow invocation

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Attempts
// ============================================================================

/// How a single model attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The model answered.
    Success,
    /// The vendor rejected the call with a rate-limit style error.
    RateLimited(String),
    /// Any other failure. Ends the run.
    Fatal(String),
}

/// Record of one model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingAttempt {
    /// Model identifier that was called.
    pub model: String,
    /// How the call ended.
    pub outcome: AttemptOutcome,
    /// Wall-clock duration of the call.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ProcessingAttempt {
    /// Creates a successful attempt.
    pub fn success(model: impl Into<String>, duration: Duration) -> Self {
        Self {
            model: model.into(),
            outcome: AttemptOutcome::Success,
            duration,
        }
    }

    /// Creates a rate-limited attempt.
    pub fn rate_limited(model: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            model: model.into(),
            outcome: AttemptOutcome::RateLimited(error.into()),
            duration,
        }
    }

    /// Creates a fatal attempt.
    pub fn fatal(model: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            model: model.into(),
            outcome: AttemptOutcome::Fatal(error.into()),
            duration,
        }
    }

    /// Returns true if the model answered.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Success)
    }

    /// Returns true if the attempt was rate-limited.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::RateLimited(_))
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of one workflow invocation.
///
/// Exactly one of these is produced per invocation and its clipboard text is
/// written back to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// The provider answered.
    Answer {
        /// Answer text.
        text: String,
        /// Model that produced the answer, when a model was called.
        model: Option<String>,
    },
    /// The invocation failed; `message` is already user-facing.
    Failed {
        /// Clipboard-ready error text, e.g. `Error: Clipboard is empty`.
        message: String,
    },
}

impl ProcessingResult {
    /// Creates an answer result.
    pub fn answer(text: impl Into<String>, model: Option<String>) -> Self {
        Self::Answer {
            text: text.into(),
            model,
        }
    }

    /// Creates a failed result.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns the text that belongs on the clipboard.
    pub fn clipboard_text(&self) -> &str {
        match self {
            Self::Answer { text, .. } => text,
            Self::Failed { message } => message,
        }
    }

    /// Returns true for an answer.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Answer { .. })
    }

    /// Returns the model that answered, if any.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Answer { model, .. } => model.as_deref(),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_constructors() {
        let ok = ProcessingAttempt::success("m3", Duration::from_millis(12));
        assert!(ok.is_success());
        assert!(!ok.is_rate_limited());

        let limited = ProcessingAttempt::rate_limited("m1", "HTTP 429", Duration::ZERO);
        assert!(limited.is_rate_limited());

        let fatal = ProcessingAttempt::fatal("m2", "HTTP 500", Duration::ZERO);
        assert_eq!(fatal.outcome, AttemptOutcome::Fatal("HTTP 500".to_string()));
    }

    #[test]
    fn test_clipboard_text() {
        let answer = ProcessingResult::answer("ANSWER", Some("m3".to_string()));
        assert_eq!(answer.clipboard_text(), "ANSWER");
        assert_eq!(answer.model(), Some("m3"));

        let failed = ProcessingResult::failed("Error: Clipboard is empty");
        assert_eq!(failed.clipboard_text(), "Error: Clipboard is empty");
        assert!(!failed.is_success());
        assert_eq!(failed.model(), None);
    }
}
