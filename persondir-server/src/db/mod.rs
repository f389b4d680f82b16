//! Database layer - connection pool and person storage
//!
//! # Design Principles
//!
//! - One pool, created at startup and shared read-only by every handler
//! - Handlers see storage only through the `PersonStore` trait
//! - Profile reads are a single JOIN
//! - Creation is one transaction; rollback on every path that does not commit

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::{MemoryPersonStore, RowCounts};
pub use pool::{
    connect, create_pool, create_pool_with_options, verify, DEFAULT_ACQUIRE_TIMEOUT,
    DEFAULT_MAX_CONNECTIONS,
};
pub use postgres::PgPersonStore;
pub use store::{CreateStep, DbError, PersonStore};
