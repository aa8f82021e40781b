//! Activity log.
//!
//! A bounded, persisted list of user-facing progress lines. Each append
//! drops the oldest entry once the log is full, writes the file, and
//! mirrors the entry to `tracing`.

use async_trait::async_trait;
use clipsage_core::{ActivityLogEntry, ActivitySink, Severity};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_activity_log_path, load_json_or_default, save_json};

/// Maximum number of entries kept.
pub const MAX_LOG_ENTRIES: usize = 50;

/// Persisted activity log.
#[derive(Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<ActivityLogEntry>>>,
    path: Option<PathBuf>,
}

impl ActivityLog {
    /// Creates an empty log backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            path: Some(path),
        }
    }

    /// Creates a log that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            path: None,
        }
    }

    /// Loads the log from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_activity_log_path()).await
    }

    /// Loads the log from `path`. Missing or corrupt files yield an empty log.
    pub async fn load(path: PathBuf) -> Self {
        let mut entries: VecDeque<ActivityLogEntry> = load_json_or_default(&path).await;
        while entries.len() > MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        debug!(path = %path.display(), entries = entries.len(), "Activity log loaded");
        Self {
            entries: Arc::new(Mutex::new(entries)),
            path: Some(path),
        }
    }

    /// Returns the backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends an entry, evicting the oldest past [`MAX_LOG_ENTRIES`].
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written. The entry is kept in
    /// memory either way.
    pub async fn append(&self, entry: ActivityLogEntry) -> Result<(), StoreError> {
        mirror(&entry);
        let mut entries = self.entries.lock().await;
        entries.push_back(entry);
        if entries.len() > MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        self.persist(&entries).await
    }

    /// Returns all entries, oldest first.
    pub async fn entries(&self) -> Vec<ActivityLogEntry> {
        self.entries.lock().await.iter().cloned().collect()
    }

    /// Returns up to `limit` entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<ActivityLogEntry> {
        self.entries
            .lock()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns the number of entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if the log has no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        info!("Activity log cleared");
        self.persist(&entries).await
    }

    async fn persist(&self, entries: &VecDeque<ActivityLogEntry>) -> Result<(), StoreError> {
        match &self.path {
            Some(path) => save_json(path, entries).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActivitySink for ActivityLog {
    async fn record(&self, entry: ActivityLogEntry) {
        if let Err(e) = self.append(entry).await {
            warn!(error = %e, "Failed to write activity log");
        }
    }
}

fn mirror(entry: &ActivityLogEntry) {
    match entry.severity {
        Severity::Info => info!(target: "clipsage::activity", "{}", entry.message),
        Severity::Success => info!(target: "clipsage::activity", success = true, "{}", entry.message),
        Severity::Error => error!(target: "clipsage::activity", "{}", entry.message),
    }
}

// ============================================================================
// Tests
// ============================================================================
