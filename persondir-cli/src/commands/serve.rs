//! HTTP server command
//!
//! Connects to the database once, then serves the person routes.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use persondir_server::{serve, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind_addr: args.bind,
            acquire_timeout: args.database.acquire_timeout(),
            database_url: args.database.database_url,
            max_connections: args.database.max_connections,
            cors_permissive: args.cors_permissive,
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting persondir server on {}", args.bind);

    serve(ServerConfig::from(args))
        .await
        .context("Server error")?;

    Ok(())
}
