//! # realtor
//!
//! Terminal front-ends for the realtor site: the chat widget talking to the
//! messaging gateway, and the CRM lead dashboard.

#![deny(unsafe_code)]

mod chat;
mod leads;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use realtor_core::{JsonFileStore, KeyValueStore};
use realtor_leads::StatusFilter;
use realtor_settings::RealtorSettings;

/// Realtor chat widget and lead dashboard.
#[derive(Parser, Debug)]
#[command(
    name = realtor_core::constants::NAME,
    version = realtor_core::constants::VERSION,
    about = "Realtor chat widget and lead dashboard"
)]
struct Cli {
    /// Settings file (defaults to `~/.realtor/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log filter directive (overrides settings; `RUST_LOG` wins over both).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the chat widget. Lines typed on stdin are sent; `/close`,
    /// `/open` and `/quit` control the widget.
    Chat {
        /// Gateway address, e.g. `ws://localhost:18789`.
        #[arg(long)]
        gateway: Option<String>,

        /// URL of the hosting page; its `gateway` query parameter is honoured.
        #[arg(long)]
        page_url: Option<String>,
    },
    /// Load and print CRM leads.
    Leads {
        /// CRM API key. Saved for later runs.
        #[arg(long)]
        api_key: Option<String>,

        /// Which leads to list: all, hot, warm or cold.
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    realtor_core::logging::init_subscriber(level, settings.logging.format);

    let store_path = settings.store.resolved_path();
    tracing::debug!(path = %store_path.display(), "using state store");
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(store_path));

    match cli.command {
        Command::Chat { gateway, page_url } => {
            chat::run(&settings, store, gateway, page_url.as_deref()).await
        }
        Command::Leads { api_key, filter } => leads::run(&settings, store, api_key, filter).await,
    }
}

/// The `--settings` file when given, otherwise `~/.realtor/settings.json`.
fn load_settings(path: Option<&std::path::Path>) -> Result<RealtorSettings> {
    match path {
        Some(path) => realtor_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => realtor_settings::load_settings().with_context(|| {
            format!(
                "Failed to load settings from {}",
                realtor_settings::settings_path().display()
            )
        }),
    }
}
