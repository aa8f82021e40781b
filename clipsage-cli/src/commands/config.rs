//! Config command - manage configuration.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use clipsage_core::{ActivitySink, ConfigStore, PresetSlot, ProviderId};
use clipsage_store::{
    ActivityLog, SettingsStore, default_activity_log_path, default_config_dir,
    default_settings_path,
};
use tracing::info;

use super::{preset_arg, provider_arg};
use crate::output::{ConfigOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Select the provider used by `process`.
    Provider {
        /// Provider: gemini or groq.
        #[arg(value_parser = provider_arg())]
        provider: ProviderId,
    },

    /// Save an API key.
    Key {
        /// The API key.
        key: String,

        /// Provider the key belongs to (defaults to the selected one).
        #[arg(long, short, value_parser = provider_arg())]
        provider: Option<ProviderId>,
    },

    /// Set the current model.
    Model {
        /// Model name from the provider's model list.
        model: String,

        /// Provider (defaults to the selected one).
        #[arg(long, short, value_parser = provider_arg())]
        provider: Option<ProviderId>,
    },

    /// Replace the model list, in priority order. No models restores the
    /// built-in list.
    Models {
        /// Model names, cheapest first.
        models: Vec<String>,

        /// Provider (defaults to the selected one).
        #[arg(long, short, value_parser = provider_arg())]
        provider: Option<ProviderId>,
    },

    /// Set or clear a preset.
    Preset {
        /// Preset slot: 1, 2 or 3.
        #[arg(value_parser = preset_arg())]
        slot: PresetSlot,

        /// Preset text. Omit to clear the slot.
        text: Option<String>,
    },

    /// Set or clear the custom instructions.
    Instructions {
        /// Instructions appended to the system prompt. Omit to clear.
        text: Option<String>,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    let store = SettingsStore::load_default().await;
    let activity = ActivityLog::load_default().await;

    match &args.action {
        ConfigAction::Show => show_config(&store, cli).await?,
        ConfigAction::Path => show_paths(cli)?,
        ConfigAction::Provider { provider } => {
            store.set_selected_provider(*provider).await?;
            activity
                .success(&format!("Provider changed to {}", provider.display_name()))
                .await;
            confirm(cli, &format!("Selected provider: {}", provider.display_name()));
        }
        ConfigAction::Key { key, provider } => {
            let provider = resolve_provider(&store, *provider).await;
            store.set_api_key(provider, key).await?;
            activity.success("API key saved").await;
            confirm(cli, &format!("{} API key saved", provider.display_name()));
        }
        ConfigAction::Model { model, provider } => {
            let provider = resolve_provider(&store, *provider).await;
            set_model(&store, provider, model).await?;
            activity
                .success(&format!("Model changed to {model}"))
                .await;
            confirm(cli, &format!("{} model: {model}", provider.display_name()));
        }
        ConfigAction::Models { models, provider } => {
            let provider = resolve_provider(&store, *provider).await;
            store.set_models(provider, models.clone()).await?;
            let config = store.provider_config(provider).await;
            activity.success("Model list saved").await;
            confirm(
                cli,
                &format!("{} models: {}", provider.display_name(), config.models.join(", ")),
            );
        }
        ConfigAction::Preset { slot, text } => {
            store.set_preset(*slot, text.clone()).await?;
            activity
                .success(&format!("Preset {} saved", slot.number()))
                .await;
            confirm(cli, &format!("Preset {} saved", slot.number()));
        }
        ConfigAction::Instructions { text } => {
            store.set_custom_instructions(text.clone()).await?;
            activity.success("Custom instructions saved").await;
            confirm(cli, "Custom instructions saved");
        }
        ConfigAction::Reset => {
            store.reset().await?;
            info!("Configuration reset");
            confirm(cli, "Configuration reset to defaults");
        }
    }

    Ok(ExitCode::Success)
}

async fn resolve_provider(store: &SettingsStore, provider: Option<ProviderId>) -> ProviderId {
    match provider {
        Some(p) => p,
        None => store.selected_provider().await,
    }
}

async fn set_model(store: &SettingsStore, provider: ProviderId, model: &str) -> Result<()> {
    let config = store.provider_config(provider).await;
    if !config.models.iter().any(|m| m == model) {
        bail!(
            "Unknown {} model: {model} (available: {})",
            provider.display_name(),
            config.models.join(", ")
        );
    }
    store.set_model(provider, model).await?;
    Ok(())
}

fn confirm(cli: &Cli, message: &str) {
    if !cli.quiet {
        println!("{message}");
    }
}

async fn show_config(store: &SettingsStore, cli: &Cli) -> Result<()> {
    let settings = store.get().await;
    let mut providers = Vec::new();
    for provider in ProviderId::all() {
        providers.push(store.provider_config(*provider).await);
    }
    let output = ConfigOutput::new(&settings, &providers);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();
    let log_path = default_activity_log_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
            println!("Activity log:  {}", log_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
                "activity_log": log_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
