//! Subprocess execution for clipboard utilities.
//!
//! Paste utilities run with captured output. Copy utilities only get stdin:
//! `xclip` and `wl-copy` fork a child that keeps owning the selection, and
//! that child must not inherit pipes we wait on.
//! Every child is spawned with `kill_on_drop`, so it is reaped on every exit
//! path including cancellation.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::ProcessError;

// ============================================================================
// Process Output
// ============================================================================

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output content.
    pub stdout: String,
    /// Standard error content.
    pub stderr: String,
    /// Exit code (0 = success).
    pub exit_code: i32,
}

impl ProcessOutput {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

// ============================================================================
// Process Runner
// ============================================================================

/// API for running clipboard utilities.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    /// Run a command and capture output.
    ///
    /// # Errors
    ///
    /// Fails if the command is not on PATH or cannot be spawned.
    #[instrument(skip(self), fields(cmd = %cmd))]
    pub async fn run(&self, cmd: &str, args: &[&str]) -> Result<ProcessOutput, ProcessError> {
        debug!(args = ?args, "Running command");
        let cmd_path = self.resolve(cmd)?;
        let start = Instant::now();

        let output = Command::new(&cmd_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        let result = ProcessOutput {
            stdout: decode_output(cmd, "stdout", output.stdout),
            stderr: decode_output(cmd, "stderr", output.stderr),
            exit_code: output.status.code().unwrap_or(-1),
        };

        debug!(
            exit_code = result.exit_code,
            duration = ?start.elapsed(),
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Command completed"
        );

        Ok(result)
    }

    /// Run a command with `input` written to its stdin and return its exit
    /// code.
    ///
    /// Output is discarded and only the direct child is awaited, so a
    /// utility that forks a long-lived selection owner returns as soon as
    /// the parent exits.
    ///
    /// # Errors
    ///
    /// Fails if the command is not on PATH, cannot be spawned, or stdin
    /// cannot be written.
    #[instrument(skip(self, input), fields(cmd = %cmd, input_len = input.len()))]
    pub async fn pipe_input(
        &self,
        cmd: &str,
        args: &[&str],
        input: &str,
    ) -> Result<i32, ProcessError> {
        debug!(args = ?args, "Piping input to command");
        let cmd_path = self.resolve(cmd)?;
        let start = Instant::now();

        let mut child = Command::new(&cmd_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await?;
        } else {
            warn!(cmd = %cmd, "stdin was not captured");
        }

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        debug!(exit_code, duration = ?start.elapsed(), "Command completed");

        Ok(exit_code)
    }

    /// Check if a command exists on PATH.
    pub fn command_exists(&self, cmd: &str) -> bool {
        self.which(cmd).is_some()
    }

    /// Find the path to a command.
    pub fn which(&self, cmd: &str) -> Option<PathBuf> {
        which::which(cmd).ok()
    }

    fn resolve(&self, cmd: &str) -> Result<PathBuf, ProcessError> {
        self.which(cmd).ok_or_else(|| {
            debug!(cmd = %cmd, "Command not found");
            ProcessError::NotFound(cmd.to_string())
        })
    }
}

/// Decodes process output as UTF-8, replacing invalid sequences.
fn decode_output(cmd: &str, stream: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                cmd = %cmd,
                stream,
                valid_up_to = e.utf8_error().valid_up_to(),
                "Command output is not valid UTF-8; replacing invalid bytes"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
