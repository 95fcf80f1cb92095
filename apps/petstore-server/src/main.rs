mod config;
mod logging;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use petstore::PetStoreModule;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Pet store server - in-memory pet catalogue with a code-first `OpenAPI` 3.1 document
#[derive(Parser)]
#[command(name = "petstore-server")]
#[command(about = "Pet store server - in-memory pet catalogue with an OpenAPI 3.1 document")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose)?;

    logging::init(&config.logging)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Pet store server starting");

    let module = PetStoreModule::seeded();
    let router = server::build_app(&config, &module)?;

    let cancel = CancellationToken::new();
    let signal_task = tokio::spawn(server::cancel_on(server::shutdown_signal(), cancel.clone()));

    let result = server::serve(&config, router, cancel).await;
    signal_task.abort();

    match &result {
        Ok(()) => tracing::info!("Pet store server stopped"),
        Err(e) => tracing::error!(error = %e, "Pet store server failed"),
    }
    result
}
