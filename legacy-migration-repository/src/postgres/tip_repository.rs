//! PostgreSQL-backed tip repository.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{NewTip, Tip};

use crate::errors::RepositoryError;
use crate::interfaces::TipRepository;

#[derive(sqlx::FromRow)]
struct TipRow {
    id: i32,
    title: String,
    tip: String,
    created_at: DateTime<Utc>,
}

impl From<TipRow> for Tip {
    fn from(row: TipRow) -> Self {
        Tip {
            id: row.id,
            title: row.title,
            tip: row.tip,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresTipRepository {
    pool: sqlx::PgPool,
}

impl PostgresTipRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TipRepository for PostgresTipRepository {
    async fn find_all(&self) -> Result<Vec<Tip>, RepositoryError> {
        let rows = sqlx::query_as::<_, TipRow>(
            "SELECT id, title, tip, created_at FROM tip ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Tip::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tip>, RepositoryError> {
        let row = sqlx::query_as::<_, TipRow>(
            "SELECT id, title, tip, created_at FROM tip WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Tip::from))
    }

    async fn add(&self, tip: &NewTip) -> Result<Tip, RepositoryError> {
        let row = sqlx::query_as::<_, TipRow>(
            "INSERT INTO tip (title, tip) VALUES ($1, $2) \
             RETURNING id, title, tip, created_at",
        )
        .bind(&tip.title)
        .bind(&tip.tip)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
