//! PostgreSQL-backed encounter repository.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{Encounter, NewEncounter};

use crate::errors::RepositoryError;
use crate::interfaces::EncounterRepository;

#[derive(sqlx::FromRow)]
struct EncounterRow {
    id: i32,
    date: String,
    rating: i32,
    comment: String,
    source: String,
    created_at: DateTime<Utc>,
    customer_id: i32,
}

impl From<EncounterRow> for Encounter {
    fn from(row: EncounterRow) -> Self {
        Encounter {
            id: row.id,
            date: row.date,
            rating: row.rating,
            comment: row.comment,
            source: row.source,
            created_at: row.created_at,
            customer_id: row.customer_id,
        }
    }
}

pub struct PostgresEncounterRepository {
    pool: sqlx::PgPool,
}

impl PostgresEncounterRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EncounterRepository for PostgresEncounterRepository {
    async fn find_all(&self) -> Result<Vec<Encounter>, RepositoryError> {
        let rows = sqlx::query_as::<_, EncounterRow>(
            "SELECT id, date, rating, comment, source, created_at, customer_id \
             FROM encounter ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Encounter::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Encounter>, RepositoryError> {
        let row = sqlx::query_as::<_, EncounterRow>(
            "SELECT id, date, rating, comment, source, created_at, customer_id \
             FROM encounter WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Encounter::from))
    }

    async fn add(&self, encounter: &NewEncounter) -> Result<Encounter, RepositoryError> {
        let row = sqlx::query_as::<_, EncounterRow>(
            "INSERT INTO encounter (date, rating, comment, source, customer_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, date, rating, comment, source, created_at, customer_id",
        )
        .bind(&encounter.date)
        .bind(encounter.rating)
        .bind(&encounter.comment)
        .bind(&encounter.source)
        .bind(encounter.customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
