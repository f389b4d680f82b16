//! PostgreSQL-backed person store
//!
//! - `get_person_info`: one JOIN across person, phone, address_join, address
//! - `create_person`: four inserts in one transaction, each step reporting
//!   its own failure

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::store::{CreateStep, DbError, PersonStore};
use crate::models::{CreatedPerson, PersonId, PersonProfile};

const PERSON_INFO_QUERY: &str = r#"
    SELECT
        p.name,
        ph.number AS phone_number,
        a.city,
        a.state,
        a.street1,
        COALESCE(a.street2, '') AS street2,
        a.zip_code
    FROM person p
    JOIN phone ph ON ph.person_id = p.id
    JOIN address_join aj ON aj.person_id = p.id
    JOIN address a ON a.id = aj.address_id
    WHERE p.id = $1
    ORDER BY ph.id, aj.id
    LIMIT 1
"#;

/// Person store over a shared connection pool
#[derive(Clone)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn get_person_info(&self, id: PersonId) -> Result<PersonProfile, DbError> {
        sqlx::query_as::<_, PersonProfile>(PERSON_INFO_QUERY)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::person_not_found(id))
    }

    /// The sqlx transaction guard rolls back on drop, so a panic or a
    /// failed commit never leaves the transaction open. Step failures also
    /// roll back explicitly before returning.
    async fn create_person(&self, profile: &PersonProfile) -> Result<CreatedPerson, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::step(CreateStep::Begin, e))?;

        match insert_profile(&mut tx, profile).await {
            Ok(created) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::step(CreateStep::Commit, e))?;
                tracing::debug!(person_id = %created.person_id, "person created");
                Ok(created)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    // Connection is discarded by the pool; nothing was committed
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Run the four inserts on an open transaction.
async fn insert_profile(
    conn: &mut PgConnection,
    profile: &PersonProfile,
) -> Result<CreatedPerson, DbError> {
    let person_id: i64 = sqlx::query_scalar("INSERT INTO person (name) VALUES ($1) RETURNING id")
        .bind(&profile.name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| DbError::step(CreateStep::InsertPerson, e))?;

    let phone_id: i64 = sqlx::query_scalar(
        "INSERT INTO phone (person_id, number) VALUES ($1, $2) RETURNING id",
    )
    .bind(person_id)
    .bind(&profile.phone_number)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DbError::step(CreateStep::InsertPhone, e))?;

    let address_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO address (city, state, street1, street2, zip_code)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&profile.city)
    .bind(&profile.state)
    .bind(&profile.street1)
    .bind(&profile.street2)
    .bind(&profile.zip_code)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DbError::step(CreateStep::InsertAddress, e))?;

    let address_join_id: i64 = sqlx::query_scalar(
        "INSERT INTO address_join (person_id, address_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(person_id)
    .bind(address_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DbError::step(CreateStep::InsertAddressJoin, e))?;

    tracing::debug!(person_id, phone_id, address_id, address_join_id, "inserted profile rows");

    Ok(CreatedPerson {
        person_id: PersonId::new(person_id),
        phone_id,
        address_id,
        address_join_id,
    })
}
