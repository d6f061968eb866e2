//! DrugNER Server CLI
//!
//! Starts the HTTP server for drug label entity recognition.

use anyhow::Context;
use clap::Parser;
use drugner_server::{config::ServerConfig, start_server};
use std::path::PathBuf;

/// Drug label named-entity recognition web server
#[derive(Debug, Parser)]
#[command(name = "drugner-server", version, about)]
struct Cli {
    /// Load configuration from a TOML file
    #[arg(short, long, env = "DRUGNER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind port from the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            eprintln!("Warning: No config file specified, using defaults");
            eprintln!("Usage: drugner-server --config <path-to-config.toml>");
            ServerConfig::default()
        }
    };

    if let Some(port) = cli.port {
        config.bind_port = port;
    }

    start_server(config).await?;

    Ok(())
}
