//! pollcord CLI - runs the poll server and manages its schema
//!
//! - `serve`: HTTP API, OAuth proxy, and static client
//! - `migrate`: create the database schema and exit

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(
    name = "pollcord",
    author,
    version,
    about = "Scheduling polls for Discord activities",
    long_about = "Serves the pollcord activity client, proxies Discord OAuth token exchange, \
                  and stores polls and availability in PostgreSQL."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (API, OAuth proxy, static client)
    Serve(commands::serve::ServeArgs),
    /// Create database tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before tracing so RUST_LOG from .env applies, and before parsing so
    // clap's env fallbacks see .env values
    let loaded_from = config::load_dotenv();
    init_tracing().ok();

    if loaded_from.is_empty() {
        info!("Using environment variables only (no .env file found)");
    } else {
        for path in &loaded_from {
            debug!("Loaded .env from {}", path.display());
        }
        let paths: Vec<String> = loaded_from.iter().map(|p| p.display().to_string()).collect();
        info!("Loaded configuration from: {}", paths.join(", "));
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
