//! Workflow commands: process, preset and count-words.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use clipsage_clipboard::{ClipboardAdapter, ContextProbe, DesktopSessionProbe};
use clipsage_core::{PresetSlot, ProcessingResult};
use clipsage_store::{ActivityLog, SettingsStore};
use clipsage_workflow::{ClipboardWorkflow, Trigger};
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::preset_arg;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the process command.
#[derive(Args, Default)]
pub struct ProcessArgs {
    /// Log the run as a manual test instead of a shortcut press.
    #[arg(long)]
    pub manual: bool,
}

/// Arguments for the preset command.
#[derive(Args)]
pub struct PresetArgs {
    /// Preset slot: 1, 2 or 3.
    #[arg(value_parser = preset_arg())]
    pub slot: PresetSlot,
}

/// Arguments for the count-words command.
#[derive(Args)]
pub struct CountWordsArgs {
    /// Text to count. Read from stdin when omitted.
    pub text: Option<String>,
}

/// Runs the process command.
pub async fn run(args: &ProcessArgs, cli: &Cli) -> Result<ExitCode> {
    let trigger = if args.manual {
        Trigger::Manual
    } else {
        Trigger::ProcessClipboard
    };
    dispatch(trigger, cli).await
}

/// Runs the preset command.
pub async fn run_preset(args: &PresetArgs, cli: &Cli) -> Result<ExitCode> {
    dispatch(Trigger::Preset(args.slot), cli).await
}

/// Runs the count-words command.
pub async fn run_count_words(args: &CountWordsArgs, cli: &Cli) -> Result<ExitCode> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read text from stdin")?;
            buf
        }
    };
    dispatch(Trigger::CountWords(text), cli).await
}

/// Builds the desktop workflow from the persisted settings and log.
async fn desktop_workflow() -> ClipboardWorkflow {
    let settings = Arc::new(SettingsStore::load_default().await);
    let activity = Arc::new(ActivityLog::load_default().await);
    let probe: Arc<dyn ContextProbe> = Arc::new(DesktopSessionProbe::new());
    let clipboard = Arc::new(ClipboardAdapter::desktop(Arc::clone(&probe)));
    debug!(
        settings = %settings.path().display(),
        readers = ?clipboard.reader_ids(),
        "Built desktop workflow"
    );
    ClipboardWorkflow::new(clipboard, probe, settings, activity)
}

async fn dispatch(trigger: Trigger, cli: &Cli) -> Result<ExitCode> {
    let workflow = desktop_workflow().await;
    let result = workflow.handle(trigger).await;
    print_result(&result, cli)?;

    Ok(if result.is_success() {
        ExitCode::Success
    } else {
        ExitCode::Error
    })
}

fn print_result(result: &ProcessingResult, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_result(result));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(result)?);
        }
    }
    Ok(())
}
