//! persondir CLI - serve person profiles over HTTP
//!
//! Subcommands:
//! - `serve`: connect to PostgreSQL and run the HTTP API
//! - `ping`: verify the database is reachable

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "persondir",
    author,
    version,
    about = "Person profile HTTP service backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Check that the database answers
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Ping(args) => commands::run_ping(args).await?,
    }

    Ok(())
}
