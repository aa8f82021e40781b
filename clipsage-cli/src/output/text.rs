//! Text output formatting with colors.

use clipsage_core::{ActivityLogEntry, ProcessingResult, Severity};

use super::json::{ConfigOutput, ProviderInfoOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the outcome of a workflow.
    pub fn format_result(&self, result: &ProcessingResult) -> String {
        match result {
            ProcessingResult::Answer { text, model } => match model {
                Some(model) => format!("{text}\n{}", self.dim(&format!("✓ {model}"))),
                None => text.clone(),
            },
            ProcessingResult::Failed { message } => self.red(message),
        }
    }

    /// Formats activity log entries, newest first.
    pub fn format_log(&self, entries: &[ActivityLogEntry]) -> String {
        if entries.is_empty() {
            return self.dim("No activity yet. Run `clipsage process` to test.");
        }
        entries
            .iter()
            .map(|e| self.format_log_entry(e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats one activity log entry.
    pub fn format_log_entry(&self, entry: &ActivityLogEntry) -> String {
        let label = format!("{:<5}", entry.severity.label());
        let label = match entry.severity {
            Severity::Info => self.cyan(&label),
            Severity::Success => self.green(&label),
            Severity::Error => self.red(&label),
        };
        format!("{} {} {}", self.dim(&entry.timestamp), label, entry.message)
    }

    /// Formats the configuration.
    pub fn format_config(&self, config: &ConfigOutput) -> String {
        let mut lines = vec![
            self.bold("ClipSage Configuration"),
            "─".repeat(40),
            String::new(),
            format!("Selected provider: {}", self.cyan(&config.selected_provider)),
        ];

        for provider in &config.providers {
            lines.push(String::new());
            lines.push(self.bold(&provider.display_name));
            let key = match &provider.api_key {
                Some(masked) => self.green(masked),
                None => self.yellow("not set"),
            };
            lines.push(format!("  API key: {key}"));
            lines.push(format!(
                "  Model:   {}",
                provider.current_model.as_deref().unwrap_or("(first available)")
            ));
            lines.push(format!("  Models:  {}", self.dim(&provider.models.join(", "))));
        }

        lines.push(String::new());
        lines.push(self.bold("Presets"));
        for preset in &config.presets {
            let text = match &preset.text {
                Some(t) => t.replace('\n', "⏎"),
                None => self.dim("(empty)"),
            };
            lines.push(format!("  {}: {text}", preset.slot));
        }

        lines.push(String::new());
        lines.push(format!(
            "Custom instructions: {}",
            config
                .custom_instructions
                .as_deref()
                .map_or_else(|| self.dim("(none)"), str::to_string)
        ));

        lines.join("\n")
    }

    /// Header for the providers table.
    pub fn format_providers_header(&self) -> String {
        self.bold(&format!(
            "{:<10} {:<8} {:<10} {:<9} {}",
            "Provider", "Key", "Failover", "Selected", "Current model"
        ))
    }

    /// One row of the providers table.
    pub fn format_provider_line(&self, info: &ProviderInfoOutput) -> String {
        let key = if info.key_configured {
            self.green(&format!("{:<8}", "✓ set"))
        } else {
            self.yellow(&format!("{:<8}", "✗ unset"))
        };
        let failover = if info.supports_failover {
            format!("{:<10}", format!("{} models", info.models.len()))
        } else {
            format!("{:<10}", "single")
        };
        let selected = if info.selected {
            self.cyan(&format!("{:<9}", "●"))
        } else {
            format!("{:<9}", "")
        };
        format!(
            "{:<10} {key} {failover} {selected} {}",
            info.id,
            info.current_model.as_deref().unwrap_or("-")
        )
    }

    // ========================================================================
    // Colors
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
