//! HTTP server command
//!
//! Runs the pollcord server: OAuth proxy, poll API, and the static client.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pollcord_server::db::{create_pool, migrations};
use pollcord_server::oauth::DiscordClient;
use pollcord_server::{run_server, AppState, OAuthConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8001")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Directory containing the built client
    #[arg(long, env = "STATIC_DIR", default_value = "client/dist")]
    pub static_dir: PathBuf,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let oauth = OAuthConfig::from_env().context("Discord OAuth is not configured")?;
    tracing::info!(client_id = %oauth.client_id, api_base = %oauth.api_base, "OAuth config loaded");

    let discord = DiscordClient::new(oauth).context("Failed to build HTTP client")?;

    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    if !args.static_dir.is_dir() {
        tracing::warn!(path = %args.static_dir.display(), "Static directory missing; client will 404");
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir,
    };

    // Blocks until shutdown
    run_server(AppState { pool, discord }, config)
        .await
        .context("Server error")?;

    Ok(())
}
