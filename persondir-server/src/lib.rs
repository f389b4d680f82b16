//! persondir-server: person profiles over HTTP
//!
//! Two operations on a PostgreSQL schema of person, phone, address and
//! address_join tables:
//! - read a flattened profile by person id
//! - create person, phone and address atomically

pub mod db;
pub mod http;
pub mod models;

use std::sync::Arc;

pub use db::{DbError, MemoryPersonStore, PersonStore, PgPersonStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{CreatedPerson, PersonId, PersonProfile, ValidationError};

/// Connect to the database and serve until shutdown.
///
/// Fails before binding if the database cannot be reached.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let pool = db::connect(
        &config.database_url,
        config.max_connections,
        config.acquire_timeout,
    )
    .await?;
    let store = Arc::new(PgPersonStore::new(pool));
    run_server(store, config).await
}
