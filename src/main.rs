use std::path::PathBuf;

use anyhow::Result;
use assistant_actions::{ActionRegistry, ActionsConfig, logging, web};
use clap::Parser;

/// Custom action server for the assistant
///
/// Examples:
///   assistant-actions
///   assistant-actions --config config.toml --port 5055
///   ACTIONS_WEATHER__API_KEY=... assistant-actions --verbose
#[derive(Parser)]
#[command(name = "assistant-actions", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ActionsConfig::load_from_path(cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging, cli.verbose)?;

    let registry = ActionRegistry::from_config(&config)?;
    tracing::info!("Registered actions: {}", registry.names().join(", "));

    web::run(registry, &config.server).await
}
