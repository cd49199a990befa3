//! Flare Trading Bot - Entry Point

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use flare_bot::config::OperatingMode;

/// Flare Trading Bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via FLARE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the operating mode from the configuration file
    #[arg(short, long, value_enum)]
    mode: Option<OperatingMode>,

    /// Override the dashboard port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Determine config path: CLI arg > FLARE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("FLARE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config_found = Path::new(&config_path).exists();
    let mut config = flare_bot::AppConfig::from_file_or_default(&config_path)?;
    config.apply_env_overrides();
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(port) = args.port {
        config.dashboard.port = port;
    }

    flare_telemetry::init_logging(Some(&config.telemetry.log_level))?;
    info!("Starting Flare Trading Bot v{}", env!("CARGO_PKG_VERSION"));
    if !config_found {
        warn!(path = %config_path, "Config file not found, using defaults");
    }
    info!(?config.mode, port = config.dashboard.port, "Configuration loaded");

    let app = flare_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
