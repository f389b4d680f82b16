//! Storage capability used by the HTTP handlers
//!
//! Handlers hold an `Arc<dyn PersonStore>` so the Postgres store can be
//! swapped for the in-memory one in tests.

use std::fmt;

use async_trait::async_trait;

use crate::models::{CreatedPerson, PersonId, PersonProfile};

/// One step of the creation transaction, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    Begin,
    InsertPerson,
    InsertPhone,
    InsertAddress,
    InsertAddressJoin,
    Commit,
}

impl CreateStep {
    pub const ALL: [CreateStep; 6] = [
        CreateStep::Begin,
        CreateStep::InsertPerson,
        CreateStep::InsertPhone,
        CreateStep::InsertAddress,
        CreateStep::InsertAddressJoin,
        CreateStep::Commit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin transaction",
            Self::InsertPerson => "insert person",
            Self::InsertPhone => "insert phone",
            Self::InsertAddress => "insert address",
            Self::InsertAddressJoin => "insert address join",
            Self::Commit => "commit transaction",
        }
    }

    /// Message shown to API clients when this step fails.
    pub fn failure_message(self) -> String {
        format!("Failed to {}", self.as_str())
    }
}

impl fmt::Display for CreateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A creation step failed; the transaction has been rolled back.
    #[error("{step} failed: {source}")]
    Step {
        step: CreateStep,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub fn step(step: CreateStep, source: sqlx::Error) -> Self {
        Self::Step { step, source }
    }

    pub fn person_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            resource: "Person",
            id: id.to_string(),
        }
    }
}

/// Read and create person profiles.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Fetch the flattened profile for `id`.
    ///
    /// A person with several phones or addresses yields the first match
    /// (lowest phone id, then lowest address link id).
    async fn get_person_info(&self, id: PersonId) -> Result<PersonProfile, DbError>;

    /// Insert person, phone, address and address link atomically.
    ///
    /// On error nothing from this call is visible to later reads.
    async fn create_person(&self, profile: &PersonProfile) -> Result<CreatedPerson, DbError>;
}
