//! Providers command - list available providers.

use anyhow::Result;
use clipsage_core::ConfigStore;
use clipsage_providers::ProviderRegistry;
use clipsage_store::SettingsStore;
use tracing::info;

use crate::output::{JsonFormatter, ProviderInfoOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the providers command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    info!("Listing providers");

    let store = SettingsStore::load_default().await;
    let selected = store.selected_provider().await;

    let mut infos = Vec::new();
    for desc in ProviderRegistry::all() {
        let config = store.provider_config(desc.id).await;
        infos.push(ProviderInfoOutput::new(desc, &config, desc.id == selected));
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(70));

            for info in &infos {
                println!("{}", formatter.format_provider_line(info));
            }

            println!();
            println!(
                "Total: {} providers ({} configured)",
                infos.len(),
                infos.iter().filter(|i| i.key_configured).count()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&infos)?);
        }
    }

    Ok(ExitCode::Success)
}
