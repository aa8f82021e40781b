//! The clipboard workflows.
//!
//! Every workflow reports through the clipboard itself: answers and
//! `Error: ...` lines are both written there, and each step appends an
//! activity log entry. Nothing is re-raised to the trigger source beyond
//! the returned [`ProcessingResult`].

use std::sync::Arc;

use clipsage_clipboard::{ClipboardAdapter, ContextProbe};
use clipsage_core::{ActivitySink, ConfigStore, PresetSlot, ProcessingResult};
use clipsage_providers::{FailoverOrchestrator, FailoverReport};
use tracing::{debug, info, instrument, warn};

use crate::error::WorkflowError;
use crate::trigger::Trigger;

/// Clipboard processing, preset copy and word count.
pub struct ClipboardWorkflow {
    clipboard: Arc<ClipboardAdapter>,
    probe: Arc<dyn ContextProbe>,
    store: Arc<dyn ConfigStore>,
    activity: Arc<dyn ActivitySink>,
    orchestrator: FailoverOrchestrator,
}

impl ClipboardWorkflow {
    /// Creates a workflow with the registry's default provider clients.
    pub fn new(
        clipboard: Arc<ClipboardAdapter>,
        probe: Arc<dyn ContextProbe>,
        store: Arc<dyn ConfigStore>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        let orchestrator = FailoverOrchestrator::new(Arc::clone(&store), Arc::clone(&activity));
        Self {
            clipboard,
            probe,
            store,
            activity,
            orchestrator,
        }
    }

    /// Replaces the failover orchestrator.
    #[must_use]
    pub fn with_orchestrator(mut self, orchestrator: FailoverOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Runs the workflow for a trigger.
    #[instrument(skip(self), fields(trigger = %trigger))]
    pub async fn handle(&self, trigger: Trigger) -> ProcessingResult {
        if let Some(message) = trigger.activity_message() {
            self.activity.info(&message).await;
        }

        match trigger {
            Trigger::ProcessClipboard | Trigger::Manual => self.process_clipboard().await,
            Trigger::Preset(slot) => match self.copy_preset(slot).await {
                Ok(text) => ProcessingResult::answer(text, None),
                Err(e) => ProcessingResult::failed(format!("Error: {e}")),
            },
            Trigger::CountWords(text) => match self.count_words(&text).await {
                Ok(count) => ProcessingResult::answer(word_count_text(count), None),
                Err(e) => ProcessingResult::failed(format!("Error: {e}")),
            },
        }
    }

    // ========================================================================
    // Clipboard Processing
    // ========================================================================

    /// Reads the clipboard, asks the selected provider, and writes the
    /// answer back.
    ///
    /// Failures before the answer exists are written to the clipboard as
    /// `Error: ...`. A failed final write is only logged.
    pub async fn process_clipboard(&self) -> ProcessingResult {
        self.activity.info("Starting clipboard process...").await;

        let report = match self.answer_clipboard().await {
            Ok(report) => report,
            Err(e) => return self.report_failure(&e).await,
        };

        self.activity.info("Writing answer to clipboard...").await;
        let outcome = self.clipboard.write_with_outcome(&report.text).await;
        let via = outcome.successful_kind();
        match outcome.result {
            Ok(()) => {
                self.activity
                    .success("Complete! Answer copied to clipboard")
                    .await;
                info!(
                    model = %report.model,
                    chars = report.text.chars().count(),
                    via = ?via,
                    "Answer written"
                );
            }
            Err(e) => {
                let err = WorkflowError::ClipboardWrite(e);
                warn!(error = %err, "Answer could not be written");
                self.activity.error(&err.activity_message()).await;
            }
        }

        ProcessingResult::answer(report.text, Some(report.model))
    }

    async fn answer_clipboard(&self) -> Result<FailoverReport, WorkflowError> {
        let context = self
            .probe
            .active_context()
            .await
            .ok_or(WorkflowError::NoActiveContext)?;
        self.activity
            .info(&format!("Active window: {context}"))
            .await;

        self.activity.info("Reading clipboard...").await;
        let outcome = self.clipboard.read_with_outcome().await;
        debug!(
            via = ?outcome.successful_kind(),
            attempts = outcome.attempts_count(),
            errors = ?outcome.errors(),
            "Clipboard read cascade finished"
        );
        let text = outcome.result.map_err(WorkflowError::ClipboardUnavailable)?;

        if text.trim().is_empty() {
            return Err(WorkflowError::EmptyClipboard);
        }
        self.activity
            .success(&format!("Read {} characters", text.chars().count()))
            .await;

        let report = self.orchestrator.process(&text).await?;
        debug!(
            model = %report.model,
            attempts = report.attempts.len(),
            rate_limited = report.rate_limited_count(),
            switched = report.switched,
            "Provider walk finished"
        );
        Ok(report)
    }

    async fn report_failure(&self, err: &WorkflowError) -> ProcessingResult {
        warn!(error = %err, "Clipboard process failed");
        self.activity.error(&err.activity_message()).await;

        let Some(message) = err.clipboard_message() else {
            return ProcessingResult::failed(format!("Error: {err}"));
        };
        if let Err(e) = self.clipboard.write_text(&message).await {
            debug!(error = %e, "Could not write error message to clipboard");
        }
        ProcessingResult::failed(message)
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Copies a preset to the clipboard verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::PresetEmpty`] for an unset or blank preset
    /// and [`WorkflowError::ClipboardWrite`] when no writer succeeds.
    pub async fn copy_preset(&self, slot: PresetSlot) -> Result<String, WorkflowError> {
        let n = slot.number();
        self.activity.info(&format!("Loading preset {n}...")).await;

        let Some(text) = self
            .store
            .preset(slot)
            .await
            .filter(|t| !t.trim().is_empty())
        else {
            let err = WorkflowError::PresetEmpty(slot);
            self.activity.error(&err.to_string()).await;
            return Err(err);
        };

        self.activity
            .info(&format!(
                "Copying preset {n} ({} chars)",
                text.chars().count()
            ))
            .await;

        if let Err(e) = self.clipboard.write_text(&text).await {
            self.activity
                .error(&format!("Failed to copy preset {n}: {e}"))
                .await;
            return Err(WorkflowError::ClipboardWrite(e));
        }

        self.activity
            .success(&format!("Preset {n} copied to clipboard"))
            .await;
        Ok(text)
    }

    // ========================================================================
    // Word Count
    // ========================================================================

    /// Counts the words in `text` and writes `Words: {n}` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::ClipboardWrite`] when no writer succeeds.
    pub async fn count_words(&self, text: &str) -> Result<usize, WorkflowError> {
        self.activity.info("Counting words...").await;

        let words = text.split_whitespace().count();
        let chars = text.chars().count();
        self.activity
            .success(&format!("Counted: {words} words, {chars} chars"))
            .await;

        if let Err(e) = self.clipboard.write_text(&word_count_text(words)).await {
            self.activity
                .error(&format!("Failed to count words: {e}"))
                .await;
            return Err(WorkflowError::ClipboardWrite(e));
        }

        self.activity
            .success("Word count copied to clipboard")
            .await;
        Ok(words)
    }
}

fn word_count_text(words: usize) -> String {
    format!("Words: {words}")
}
