//! Command implementations for persondir CLI

pub mod ping;
pub mod serve;

use std::time::Duration;

use clap::Args;

pub use ping::run_ping;
pub use serve::run_serve;

/// Database connection arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string (host, credentials, database name)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = persondir_server::db::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a database connection before giving up
    #[arg(long, default_value_t = persondir_server::db::DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub acquire_timeout: u64,
}

impl DatabaseArgs {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout)
    }
}
