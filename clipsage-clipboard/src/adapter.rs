//! Clipboard adapter: an ordered cascade of strategies.
//!
//! The adapter tries each reader (or writer) in order until one succeeds.
//! When every strategy fails, the last failure is returned.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::context::ContextProbe;
use crate::error::ClipboardError;
use crate::host::system::ActiveContextClipboard;
use crate::secondary::{SecondaryContextClipboard, SecondaryContextLauncher};
use crate::strategy::{AccessKind, ClipboardReader, ClipboardWriter};

// ============================================================================
// Access Attempt
// ============================================================================

/// Record of a single strategy attempt.
#[derive(Debug, Clone)]
pub struct AccessAttempt {
    /// The strategy ID that was attempted.
    pub strategy_id: String,
    /// The mechanism used.
    pub kind: AccessKind,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl AccessAttempt {
    /// Creates a successful attempt record.
    pub fn success(strategy_id: impl Into<String>, kind: AccessKind, duration: Duration) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: true,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        strategy_id: impl Into<String>,
        kind: AccessKind,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Access Outcome
// ============================================================================

/// The outcome of running the cascade in one direction.
#[derive(Debug)]
pub struct AccessOutcome<T> {
    /// The result (success or last error).
    pub result: Result<T, ClipboardError>,
    /// All attempts made.
    pub attempts: Vec<AccessAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl<T> AccessOutcome<T> {
    /// Returns true if some strategy succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of strategies that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the kind of the strategy that succeeded, if any.
    pub fn successful_kind(&self) -> Option<AccessKind> {
        self.attempts.iter().find(|a| a.success).map(|a| a.kind)
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Clipboard Adapter
// ============================================================================

/// Ordered clipboard strategies behind a single read/write contract.
#[derive(Default)]
pub struct ClipboardAdapter {
    readers: Vec<Box<dyn ClipboardReader>>,
    writers: Vec<Box<dyn ClipboardWriter>>,
}

impl ClipboardAdapter {
    /// Creates an adapter with no strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the desktop cascade.
    ///
    /// Direct access in the active context comes first; the secondary
    /// context (native handle, then platform utilities) is the fallback.
    /// The secondary context is started on first use.
    pub fn desktop(probe: Arc<dyn ContextProbe>) -> Self {
        let secondary =
            SecondaryContextClipboard::new(Arc::new(SecondaryContextLauncher::desktop()));
        Self::new()
            .with_reader(ActiveContextClipboard::new(Arc::clone(&probe)))
            .with_reader(secondary.clone())
            .with_writer(ActiveContextClipboard::new(probe))
            .with_writer(secondary)
    }

    /// Appends a reader, builder style.
    #[must_use]
    pub fn with_reader(mut self, reader: impl ClipboardReader + 'static) -> Self {
        self.readers.push(Box::new(reader));
        self
    }

    /// Appends a writer, builder style.
    #[must_use]
    pub fn with_writer(mut self, writer: impl ClipboardWriter + 'static) -> Self {
        self.writers.push(Box::new(writer));
        self
    }

    /// Appends a reader.
    pub fn add_reader(&mut self, reader: Box<dyn ClipboardReader>) {
        self.readers.push(reader);
    }

    /// Appends a writer.
    pub fn add_writer(&mut self, writer: Box<dyn ClipboardWriter>) {
        self.writers.push(writer);
    }

    /// Returns the reader IDs in cascade order.
    pub fn reader_ids(&self) -> Vec<&str> {
        self.readers.iter().map(|r| r.id()).collect()
    }

    /// Returns the writer IDs in cascade order.
    pub fn writer_ids(&self) -> Vec<&str> {
        self.writers.iter().map(|w| w.id()).collect()
    }

    /// Reads clipboard text through the first reader that succeeds.
    ///
    /// # Errors
    ///
    /// Returns the last reader's error when all of them fail.
    pub async fn read_text(&self) -> Result<String, ClipboardError> {
        self.read_with_outcome().await.result
    }

    /// Writes clipboard text through the first writer that succeeds.
    ///
    /// # Errors
    ///
    /// Returns the last writer's error when all of them fail.
    pub async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.write_with_outcome(text).await.result
    }

    /// Runs the read cascade and reports every attempt.
    #[instrument(skip(self), fields(readers = self.readers.len()))]
    pub async fn read_with_outcome(&self) -> AccessOutcome<String> {
        let start = Instant::now();
        let mut attempts = Vec::new();
        let mut last_error = ClipboardError::NoStrategies;

        for reader in &self.readers {
            let id = reader.id();
            let kind = reader.kind();
            let attempt_start = Instant::now();
            debug!(strategy = %id, kind = %kind, "Reading clipboard");

            match reader.read().await {
                Ok(text) => {
                    let duration = attempt_start.elapsed();
                    info!(strategy = %id, chars = text.chars().count(), "Clipboard read");
                    attempts.push(AccessAttempt::success(id, kind, duration));
                    return AccessOutcome {
                        result: Ok(text),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(strategy = %id, error = %error, "Clipboard read failed");
                    attempts.push(AccessAttempt::failure(id, kind, error.to_string(), duration));

                    last_error = error;
                }
            }
        }

        AccessOutcome {
            result: Err(last_error),
            attempts,
            duration: start.elapsed(),
        }
    }

    /// Runs the write cascade and reports every attempt.
    #[instrument(skip(self, text), fields(writers = self.writers.len(), chars = text.chars().count()))]
    pub async fn write_with_outcome(&self, text: &str) -> AccessOutcome<()> {
        let start = Instant::now();
        let mut attempts = Vec::new();
        let mut last_error = ClipboardError::NoStrategies;

        for writer in &self.writers {
            let id = writer.id();
            let kind = writer.kind();
            let attempt_start = Instant::now();
            debug!(strategy = %id, kind = %kind, "Writing clipboard");

            match writer.write(text).await {
                Ok(()) => {
                    let duration = attempt_start.elapsed();
                    info!(strategy = %id, "Clipboard written");
                    attempts.push(AccessAttempt::success(id, kind, duration));
                    return AccessOutcome {
                        result: Ok(()),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(strategy = %id, error = %error, "Clipboard write failed");
                    attempts.push(AccessAttempt::failure(id, kind, error.to_string(), duration));

                    last_error = error;
                }
            }
        }

        AccessOutcome {
            result: Err(last_error),
            attempts,
            duration: start.elapsed(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockReader {
        id: String,
        result: Option<String>,
    }

    impl MockReader {
        fn ok(id: &str, text: &str) -> Self {
            Self {
                id: id.to_string(),
                result: Some(text.to_string()),
            }
        }

        fn failing(id: &str) -> Self {
            Self {
                id: id.to_string(),
                result: None,
            }
        }
    }

    #[async_trait]
    impl ClipboardReader for MockReader {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> AccessKind {
            AccessKind::Modern
        }

        async fn read(&self) -> Result<String, ClipboardError> {
            self.result
                .clone()
                .ok_or_else(|| ClipboardError::Backend(format!("{} failed", self.id)))
        }
    }

    #[derive(Default)]
    struct MockWriter {
        fail: bool,
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardWriter for MockWriter {
        fn id(&self) -> &str {
            if self.fail { "mock.fail" } else { "mock.ok" }
        }

        fn kind(&self) -> AccessKind {
            AccessKind::Emulated
        }

        async fn write(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::CopyUnavailable);
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_desktop_cascade_order() {
        let adapter = ClipboardAdapter::desktop(Arc::new(crate::FixedContextProbe::absent()));
        assert_eq!(adapter.reader_ids(), vec!["active.read", "secondary.read"]);
        assert_eq!(adapter.writer_ids(), vec!["active.write", "secondary.write"]);
    }

    #[tokio::test]
    async fn test_empty_adapter() {
        let adapter = ClipboardAdapter::new();

        let outcome = adapter.read_with_outcome().await;
        assert!(!outcome.is_success());
        assert!(matches!(outcome.result, Err(ClipboardError::NoStrategies)));

        let result = adapter.write_text("x").await;
        assert!(matches!(result, Err(ClipboardError::NoStrategies)));
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let adapter = ClipboardAdapter::new()
            .with_reader(MockReader::ok("first", "one"))
            .with_reader(MockReader::ok("second", "two"));

        let outcome = adapter.read_with_outcome().await;
        assert_eq!(outcome.result.as_deref().unwrap(), "one");
        assert_eq!(outcome.attempts_count(), 1);
        assert_eq!(outcome.successful_kind(), Some(AccessKind::Modern));
    }

    #[tokio::test]
    async fn test_fallback_on_failure() {
        let adapter = ClipboardAdapter::new()
            .with_reader(MockReader::failing("broken"))
            .with_reader(MockReader::ok("working", "text"));

        let outcome = adapter.read_with_outcome().await;
        assert_eq!(outcome.result.as_deref().unwrap(), "text");
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.errors(), vec!["Clipboard backend error: broken failed"]);
    }

    #[tokio::test]
    async fn test_last_failure_is_returned() {
        let adapter = ClipboardAdapter::new()
            .with_reader(MockReader::failing("a"))
            .with_reader(MockReader::failing("b"));

        let err = adapter.read_text().await.unwrap_err();
        assert_eq!(err.to_string(), "Clipboard backend error: b failed");
    }

    #[tokio::test]
    async fn test_every_reader_tried_once_before_failing() {
        let adapter = ClipboardAdapter::new()
            .with_reader(MockReader::failing("a"))
            .with_reader(MockReader::failing("b"));

        let outcome = adapter.read_with_outcome().await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.successful_kind(), None);
    }

    #[tokio::test]
    async fn test_write_falls_through_to_working_writer() {
        let adapter = ClipboardAdapter::new()
            .with_writer(MockWriter {
                fail: true,
                ..MockWriter::default()
            })
            .with_writer(MockWriter::default());

        let outcome = adapter.write_with_outcome("hello").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(adapter.writer_ids(), vec!["mock.fail", "mock.ok"]);
    }
}
