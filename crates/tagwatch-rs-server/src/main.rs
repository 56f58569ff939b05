//! `tagwatch` server binary.

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tagwatch_rs_config::{DEFAULT_CONFIG_FILE, ServiceConfig};
use tagwatch_rs_server::{AppState, router};
use tokio::net::TcpListener;

/// Command-line options for the server.
#[derive(Parser)]
#[command(name = "tagwatch", version)]
struct Cli {
    /// Optional path to a tagwatch.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen address, overriding `server.bind`
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Ok(path) = dotenv {
        info!("loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
        config.validate()?;
    }
    if std::env::var_os(&config.storage.connection_string_env).is_none() {
        warn!(
            "{} is not set; /save-response will fail until it is",
            config.storage.connection_string_env
        );
    }

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("tagwatch listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("tagwatch stopped");
    Ok(())
}

/// Explicit path, else `tagwatch.json5` in the working directory, else defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    if let Some(path) = path {
        return ServiceConfig::load_from_path(path)
            .with_context(|| format!("failed to load {}", path.display()));
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return ServiceConfig::load_from_path(local)
            .with_context(|| format!("failed to load {}", local.display()));
    }
    info!("no config file found; using defaults");
    Ok(ServiceConfig::default())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
