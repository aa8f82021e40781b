//! Log command - show or clear the activity log.

use anyhow::Result;
use clap::{Args, Subcommand};
use clipsage_store::ActivityLog;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the log command.
#[derive(Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub action: Option<LogAction>,

    /// Number of entries to show, newest first.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: usize,
}

/// Log subcommands.
#[derive(Subcommand)]
pub enum LogAction {
    /// Remove every entry.
    Clear,
}

/// Runs the log command.
pub async fn run(args: &LogArgs, cli: &Cli) -> Result<ExitCode> {
    let log = ActivityLog::load_default().await;

    if let Some(LogAction::Clear) = args.action {
        log.clear().await?;
        if !cli.quiet {
            println!("Activity log cleared");
        }
        return Ok(ExitCode::Success);
    }

    let entries = log.recent(args.limit).await;
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_log(&entries));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&entries)?);
        }
    }

    Ok(ExitCode::Success)
}
