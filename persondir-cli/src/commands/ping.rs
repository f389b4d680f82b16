//! Database connectivity check

use anyhow::{Context, Result};
use clap::Parser;

use persondir_server::db::connect;

use super::DatabaseArgs;

/// Arguments for the ping command
#[derive(Parser, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Connect and run the verification query
pub async fn run_ping(args: PingArgs) -> Result<()> {
    let database = &args.database;
    let pool = connect(
        &database.database_url,
        database.max_connections,
        database.acquire_timeout(),
    )
    .await
    .context("Failed to connect to the database")?;
    pool.close().await;

    println!("ok");
    Ok(())
}
