mod api;
mod bootstrap;
mod config;
mod model;
mod server;
mod store;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use config::{Config, LogConfig};
use server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// HTTP CRUD service for car records persisted to a JSON file
#[derive(Debug, Parser)]
#[command(name = "carstore", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening address, overrides the configuration file
    #[arg(long)]
    addr: Option<String>,

    /// Backing JSON file, overrides the configuration file
    #[arg(long)]
    data_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(addr) = self.addr {
            config.server_addr = addr;
        }
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        Ok(config)
    }
}

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config()?;
    init_logging(&config.log)?;

    info!("Starting carstore");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(bootstrap::open_store(&config.data_file));

    let server = Server::bind(&config.server_addr, store)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;
    info!("Server listening on: {}", server.local_addr());

    server.run(shutdown_signal()).await?;

    Ok(())
}
