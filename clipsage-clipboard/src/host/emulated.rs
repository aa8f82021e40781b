//! Emulated clipboard access through platform utilities.
//!
//! Used when the native handle cannot be opened. Paste runs the first
//! installed paste utility after a short grace period; copy pipes the text
//! into the first installed copy utility.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ClipboardError, ProcessError};
use crate::host::process::ProcessRunner;
use crate::strategy::{AccessKind, ClipboardReader, ClipboardWriter};

/// Delay before running the paste utility.
pub const PASTE_GRACE_PERIOD: Duration = Duration::from_millis(50);

// ============================================================================
// Clipboard Command
// ============================================================================

/// A clipboard utility invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    /// Program name, looked up on PATH.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Whether the utility appends a line ending that is not clipboard text.
    pub appends_line_ending: bool,
}

impl ClipboardCommand {
    /// Creates a command.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            appends_line_ending: false,
        }
    }

    /// Marks the utility as appending one line ending to its output.
    #[must_use]
    pub fn with_trailing_line_ending(mut self) -> Self {
        self.appends_line_ending = true;
        self
    }

    fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Paste utilities for this platform, in preference order.
pub fn platform_paste_commands() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![ClipboardCommand::new("pbpaste", &[])]
    } else if cfg!(target_os = "windows") {
        vec![
            ClipboardCommand::new("powershell", &["-NoProfile", "-Command", "Get-Clipboard -Raw"])
                .with_trailing_line_ending(),
        ]
    } else {
        vec![
            ClipboardCommand::new("wl-paste", &["--no-newline"]),
            ClipboardCommand::new("xclip", &["-selection", "clipboard", "-o"]),
            ClipboardCommand::new("xsel", &["--clipboard", "--output"]),
        ]
    }
}

/// Copy utilities for this platform, in preference order.
pub fn platform_copy_commands() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![ClipboardCommand::new("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        vec![ClipboardCommand::new("clip", &[])]
    } else {
        vec![
            ClipboardCommand::new("wl-copy", &[]),
            ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
            ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
        ]
    }
}

// ============================================================================
// Emulated Clipboard
// ============================================================================

/// Clipboard access by driving platform utilities as child processes.
#[derive(Debug, Clone)]
pub struct EmulatedClipboard {
    runner: ProcessRunner,
    paste_commands: Vec<ClipboardCommand>,
    copy_commands: Vec<ClipboardCommand>,
    paste_grace: Duration,
}

impl EmulatedClipboard {
    /// Creates an emulated clipboard with the platform's utilities.
    pub fn new() -> Self {
        Self::with_commands(platform_paste_commands(), platform_copy_commands())
    }

    /// Creates an emulated clipboard with explicit utilities.
    pub fn with_commands(paste: Vec<ClipboardCommand>, copy: Vec<ClipboardCommand>) -> Self {
        Self {
            runner: ProcessRunner::new(),
            paste_commands: paste,
            copy_commands: copy,
            paste_grace: PASTE_GRACE_PERIOD,
        }
    }

    /// Overrides the paste grace period.
    #[must_use]
    pub fn with_paste_grace(mut self, grace: Duration) -> Self {
        self.paste_grace = grace;
        self
    }
}

impl Default for EmulatedClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardReader for EmulatedClipboard {
    fn id(&self) -> &str {
        "emulated.read"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::Emulated
    }

    async fn read(&self) -> Result<String, ClipboardError> {
        tokio::time::sleep(self.paste_grace).await;

        for cmd in &self.paste_commands {
            if !self.runner.command_exists(&cmd.program) {
                continue;
            }
            match self.runner.run(&cmd.program, &cmd.arg_refs()).await {
                Ok(output) if output.success() => {
                    debug!(program = %cmd.program, "Emulated paste succeeded");
                    return Ok(if cmd.appends_line_ending {
                        strip_line_ending(output.stdout)
                    } else {
                        output.stdout
                    });
                }
                Ok(output) => {
                    let err = ProcessError::NonZeroExit {
                        code: output.exit_code,
                        stderr: output.stderr.trim().to_string(),
                    };
                    warn!(program = %cmd.program, error = %err, "Paste utility failed");
                }
                Err(e) => warn!(program = %cmd.program, error = %e, "Paste utility could not run"),
            }
        }

        Err(ClipboardError::PasteUnavailable)
    }
}

#[async_trait]
impl ClipboardWriter for EmulatedClipboard {
    fn id(&self) -> &str {
        "emulated.write"
    }

    fn kind(&self) -> AccessKind {
        AccessKind::Emulated
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        for cmd in &self.copy_commands {
            if !self.runner.command_exists(&cmd.program) {
                continue;
            }
            match self
                .runner
                .pipe_input(&cmd.program, &cmd.arg_refs(), text)
                .await
            {
                Ok(0) => {
                    debug!(program = %cmd.program, "Emulated copy succeeded");
                    return Ok(());
                }
                Ok(code) => {
                    warn!(program = %cmd.program, code, "Copy utility failed");
                }
                Err(e) => warn!(program = %cmd.program, error = %e, "Copy utility could not run"),
            }
        }

        Err(ClipboardError::CopyUnavailable)
    }
}

/// Removes one trailing `\r\n` or `\n`.
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    } else if text.ends_with('\n') {
        text.truncate(text.len() - 1);
    }
    text
}

// ============================================================================
// Tests
// ============================================================================
