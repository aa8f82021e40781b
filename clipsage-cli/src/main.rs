// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `ClipSage` CLI - clipboard-driven AI answers from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Save a Gemini key and process whatever is on the clipboard
//! clipsage config key AIza...
//! clipsage process
//!
//! # Switch to Groq
//! clipsage config provider groq
//! clipsage config key --provider groq gsk_...
//!
//! # Copy preset 2 to the clipboard
//! clipsage preset 2
//!
//! # Count words of a selection
//! echo "some selected text" | clipsage count-words
//!
//! # Recent activity as JSON
//! clipsage log --limit 20 --format json --pretty
//! ```

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, log, process, providers};

// ============================================================================
// CLI Definition
// ============================================================================

/// `ClipSage` CLI - clipboard AI assistant.
#[derive(Parser)]
#[command(name = "clipsage")]
#[command(about = "Clipboard-driven AI text assistant")]
#[command(long_about = r#"
ClipSage reads the clipboard, asks an AI provider, and writes the answer
back to the clipboard. Errors are written to the clipboard too.

Supported providers:
  • Google Gemini (gemini) - several models, falls over on rate limits
  • Groq (groq)            - single model

Examples:
  clipsage process               # Answer the clipboard text
  clipsage preset 1              # Copy preset 1
  clipsage count-words "a b c"   # Writes "Words: 3"
  clipsage config show           # Current settings
  clipsage log                   # Recent activity
"#)]
#[command(version)]
#[command(author = "ClipSage Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'process'.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Answer the clipboard text with the selected provider.
    #[command(visible_alias = "p")]
    Process(process::ProcessArgs),

    /// Copy a preset to the clipboard.
    Preset(process::PresetArgs),

    /// Count words and copy "Words: N" to the clipboard.
    #[command(visible_alias = "wc")]
    CountWords(process::CountWordsArgs),

    /// List available providers.
    Providers,

    /// Show or clear the activity log.
    #[command(visible_alias = "l")]
    Log(log::LogArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error, including a failed workflow.
    Error = 1,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("clipsage=debug,info")
    } else {
        EnvFilter::new("clipsage=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Returns instead of calling `std::process::exit` so clipboard handles are
/// dropped normally and can hand their contents to a clipboard manager.
#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Process(args)) => process::run(args, &cli).await,
        Some(Commands::Preset(args)) => process::run_preset(args, &cli).await,
        Some(Commands::CountWords(args)) => process::run_count_words(args, &cli).await,
        Some(Commands::Providers) => providers::run(&cli).await,
        Some(Commands::Log(args)) => log::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        None => process::run(&process::ProcessArgs::default(), &cli).await,
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            ExitCode::Error.into()
        }
    }
}
