//! The secondary clipboard context.
//!
//! A long-lived worker task that owns its own clipboard strategies (native
//! handle first, platform utilities second). Callers talk to it with
//! [`ClipboardRequest`] messages and get a [`ClipboardResponse`] back on a
//! oneshot channel. The worker is started at most once per
//! [`SecondaryContextLauncher`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{OnceCell, mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::adapter::ClipboardAdapter;
use crate::error::ClipboardError;
use crate::host::emulated::EmulatedClipboard;
use crate::host::system::ModernClipboard;
use crate::strategy::{AccessKind, ClipboardReader, ClipboardWriter};

/// Capacity of the request queue.
const REQUEST_QUEUE_CAPACITY: usize = 16;

// ============================================================================
// Protocol
// ============================================================================

/// A request sent to the secondary context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ClipboardRequest {
    /// Read the clipboard text.
    ReadClipboard,
    /// Replace the clipboard text.
    WriteClipboard {
        /// Text to store.
        text: String,
    },
}

/// The secondary context's answer to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Clipboard text, for successful reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClipboardResponse {
    /// A successful read.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            error: None,
        }
    }

    /// A successful write.
    pub fn ok() -> Self {
        Self {
            success: true,
            text: None,
            error: None,
        }
    }

    /// A failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.into()),
        }
    }

    /// Converts the response into the text it carries.
    ///
    /// A successful response without text yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::SecondaryContext`] for failed responses.
    pub fn into_result(self) -> Result<String, ClipboardError> {
        if self.success {
            Ok(self.text.unwrap_or_default())
        } else {
            Err(ClipboardError::SecondaryContext(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

// ============================================================================
// Secondary Context
// ============================================================================

struct Envelope {
    request: ClipboardRequest,
    reply: oneshot::Sender<ClipboardResponse>,
}

/// Handle to a running secondary context worker.
#[derive(Clone)]
pub struct SecondaryContext {
    tx: mpsc::Sender<Envelope>,
}

impl SecondaryContext {
    /// Starts a worker that serves requests with `adapter`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(adapter: ClipboardAdapter) -> Self {
        let (tx, rx) = mpsc::channel(REQUEST_QUEUE_CAPACITY);
        tokio::spawn(run_worker(adapter, rx));
        Self { tx }
    }

    /// Starts a worker with the modern and emulated strategies.
    pub fn spawn_desktop() -> Self {
        let modern = ModernClipboard::new();
        let emulated = EmulatedClipboard::new();
        let adapter = ClipboardAdapter::new()
            .with_reader(modern.clone())
            .with_reader(emulated.clone())
            .with_writer(modern)
            .with_writer(emulated);
        Self::spawn(adapter)
    }

    /// Sends a request and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::NoResponse`] if the worker has stopped or
    /// dropped the reply channel.
    #[instrument(skip_all)]
    pub async fn request(&self, request: ClipboardRequest) -> Result<ClipboardResponse, ClipboardError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| ClipboardError::NoResponse)?;
        rx.await.map_err(|_| ClipboardError::NoResponse)
    }
}

async fn run_worker(adapter: ClipboardAdapter, mut rx: mpsc::Receiver<Envelope>) {
    info!("Secondary clipboard context started");

    while let Some(Envelope { request, reply }) = rx.recv().await {
        let response = match request {
            ClipboardRequest::ReadClipboard => match adapter.read_text().await {
                Ok(text) => ClipboardResponse::text(text),
                Err(e) => ClipboardResponse::failure(e.to_string()),
            },
            ClipboardRequest::WriteClipboard { text } => match adapter.write_text(&text).await {
                Ok(()) => ClipboardResponse::ok(),
                Err(e) => ClipboardResponse::failure(e.to_string()),
            },
        };

        if reply.send(response).is_err() {
            debug!("Requester went away before the response was sent");
        }
    }

    debug!("Secondary clipboard context stopped");
}

// ============================================================================
// Launcher
// ============================================================================

type ContextFactory = Box<dyn Fn() -> SecondaryContext + Send + Sync>;

/// Lazily starts a secondary context, at most once.
pub struct SecondaryContextLauncher {
    cell: OnceCell<SecondaryContext>,
    factory: ContextFactory,
}

impl SecondaryContextLauncher {
    /// A launcher for the desktop worker.
    pub fn desktop() -> Self {
        Self::with_factory(SecondaryContext::spawn_desktop)
    }

    /// A launcher that starts its worker with `factory`.
    pub fn with_factory(factory: impl Fn() -> SecondaryContext + Send + Sync + 'static) -> Self {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Returns true once the worker has been started.
    pub fn is_started(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the running context, starting it on first use.
    pub async fn ensure(&self) -> &SecondaryContext {
        if self.cell.initialized() {
            debug!("Secondary context already exists");
        }
        self.cell
            .get_or_init(|| async {
                info!("Creating secondary context");
                (self.factory)()
            })
            .await
    }
}

// ============================================================================
// Strategy
// ============================================================================

/// Clipboard strategy that delegates to the secondary context.
#[derive(Clone)]
pub struct SecondaryContextClipboard {
    launcher: Arc<SecondaryContextLauncher>,
}

impl SecondaryContextClipboard {
    /// Creates a strategy backed by `launcher`.
    pub fn new(launcher: Arc<SecondaryContextLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl ClipboardReader for SecondaryContextClipboard {
    fn id(&self) -> &str {
        "secondary.read"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::SecondaryContext
    }

    async fn read(&self) -> Result<String, ClipboardError> {
        let context = self.launcher.ensure().await;
        context
            .request(ClipboardRequest::ReadClipboard)
            .await?
            .into_result()
    }
}

#[async_trait]
impl ClipboardWriter for SecondaryContextClipboard {
    fn id(&self) -> &str {
        "secondary.write"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::SecondaryContext
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let context = self.launcher.ensure().await;
        let response = context
            .request(ClipboardRequest::WriteClipboard {
                text: text.to_string(),
            })
            .await?;
        if !response.success {
            warn!(error = ?response.error, "Secondary context rejected write");
        }
        response.into_result().map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct MemoryClipboard(Arc<Mutex<String>>);

    #[async_trait]
    impl ClipboardReader for MemoryClipboard {
        fn id(&self) -> &str {
            "memory.read"
        }

        fn kind(&self) -> AccessKind {
            AccessKind::Modern
        }

        async fn read(&self) -> Result<String, ClipboardError> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl ClipboardWriter for MemoryClipboard {
        fn id(&self) -> &str {
            "memory.write"
        }

        fn kind(&self) -> AccessKind {
            AccessKind::Modern
        }

        async fn write(&self, text: &str) -> Result<(), ClipboardError> {
            *self.0.lock().unwrap() = text.to_string();
            Ok(())
        }
    }

    fn memory_context() -> SecondaryContext {
        let memory = MemoryClipboard::default();
        SecondaryContext::spawn(
            ClipboardAdapter::new()
                .with_reader(memory.clone())
                .with_writer(memory),
        )
    }

    #[test]
    fn test_request_wire_shape() {
        let read = serde_json::to_value(ClipboardRequest::ReadClipboard).unwrap();
        assert_eq!(read, serde_json::json!({"action": "readClipboard"}));

        let write = serde_json::to_value(ClipboardRequest::WriteClipboard {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(
            write,
            serde_json::json!({"action": "writeClipboard", "text": "hi"})
        );
    }

    #[test]
    fn test_response_wire_shape() {
        let ok = serde_json::to_value(ClipboardResponse::ok()).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true}));

        let failed: ClipboardResponse =
            serde_json::from_str(r#"{"success":false,"error":"Cannot write to clipboard"}"#)
                .unwrap();
        let err = failed.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Cannot write to clipboard");
    }

    #[tokio::test]
    async fn test_worker_round_trip() {
        let context = memory_context();

        let response = context
            .request(ClipboardRequest::WriteClipboard {
                text: "a\nb\tc".to_string(),
            })
            .await
            .unwrap();
        assert!(response.success);

        let text = context
            .request(ClipboardRequest::ReadClipboard)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(text, "a\nb\tc");
    }

    #[tokio::test]
    async fn test_worker_reports_adapter_failure() {
        let context = SecondaryContext::spawn(ClipboardAdapter::new());
        let response = context
            .request(ClipboardRequest::ReadClipboard)
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("No clipboard strategies configured")
        );
    }

    #[tokio::test]
    async fn test_closed_worker_is_no_response() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let context = SecondaryContext { tx };

        let err = context
            .request(ClipboardRequest::ReadClipboard)
            .await
            .unwrap_err();
        assert!(matches!(err, ClipboardError::NoResponse));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_no_response() {
        let (tx, mut rx) = mpsc::channel::<Envelope>(1);
        tokio::spawn(async move {
            // Accept the request and drop the reply sender.
            let _ = rx.recv().await;
        });
        let context = SecondaryContext { tx };

        let err = context
            .request(ClipboardRequest::ReadClipboard)
            .await
            .unwrap_err();
        assert!(matches!(err, ClipboardError::NoResponse));
    }

    #[tokio::test]
    async fn test_launcher_starts_once() {
        let starts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&starts);
        let launcher = Arc::new(SecondaryContextLauncher::with_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            memory_context()
        }));
        assert!(!launcher.is_started());

        let clipboard = SecondaryContextClipboard::new(Arc::clone(&launcher));
        clipboard.write("first").await.unwrap();
        clipboard.write("second").await.unwrap();
        assert_eq!(clipboard.read().await.unwrap(), "second");

        assert!(launcher.is_started());
        assert_eq!(starts.load(Ordering::SeqCst), 1);
    }
}
