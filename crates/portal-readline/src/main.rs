use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use portal_application::PortalUseCase;
use portal_core::config::PortalConfig;
use portal_core::session::CredentialStore;
use portal_infrastructure::{ConfigService, FileCredentialStore, PortalPaths};
use portal_interaction::{HttpPortalApi, RealtimeClient, RealtimeSubscription};

mod commands;
mod helper;
mod logging;
mod notifier;
mod render;
mod repl;

use notifier::TerminalNotifier;

#[derive(Parser)]
#[command(name = "edu-portal")]
#[command(about = "Terminal client for the special-education collaboration portal", long_about = None)]
struct Cli {
    /// Portal server base URL, overrides the config file and PORTAL_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `portal_interaction=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Do not open the realtime channel
    #[arg(long)]
    no_realtime: bool,
}

fn load_config(cli: &Cli, paths: &PortalPaths) -> Result<PortalConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(paths)?,
    };
    let mut config = service.load_with_env()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if cli.no_realtime {
        config.realtime_enabled = false;
    }
    Ok(config)
}

/// Opens the realtime channel. A failure only disables live updates.
async fn connect_realtime(config: &PortalConfig) -> Option<RealtimeSubscription> {
    if !config.realtime_enabled {
        return None;
    }
    let result = match RealtimeClient::new(config.realtime_url()) {
        Ok(client) => client.connect().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(subscription) => Some(subscription),
        Err(e) => {
            warn!("Realtime channel unavailable: {}", e);
            println!("{}", "Live updates unavailable.".bright_black());
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = PortalPaths::default();

    let _log_guard = logging::init(&paths.logs_dir()?, cli.log_level.as_deref())?;
    let config = load_config(&cli, &paths)?;
    info!("Using portal server {}", config.api_url);

    let store: Arc<dyn CredentialStore> = Arc::new(match &config.session_file {
        Some(path) => FileCredentialStore::with_path(PathBuf::from(path)),
        None => FileCredentialStore::new()?,
    });
    let api = Arc::new(HttpPortalApi::with_timeout(
        config.api_url.clone(),
        store.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let portal = PortalUseCase::new(store, api, Arc::new(TerminalNotifier::default()));

    let realtime = connect_realtime(&config).await;
    repl::run(portal, realtime).await
}
