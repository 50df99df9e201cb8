//! PostgreSQL-backed clothing item repository.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use legacy_migration_shared::types::{ClothingItem, FileId, NewClothingItem};

use crate::errors::RepositoryError;
use crate::interfaces::{ClothingRepository, FileStore};

#[derive(sqlx::FromRow)]
struct ClothingRow {
    id: i32,
    legacy_id: Option<i32>,
    kind: String,
    image_id: Option<FileId>,
    created_at: DateTime<Utc>,
    customer_id: i32,
}

impl From<ClothingRow> for ClothingItem {
    fn from(row: ClothingRow) -> Self {
        ClothingItem {
            id: row.id,
            legacy_id: row.legacy_id,
            kind: row.kind,
            image_id: row.image_id,
            created_at: row.created_at,
            customer_id: row.customer_id,
        }
    }
}

pub struct PostgresClothingRepository {
    pool: sqlx::PgPool,
    files: Arc<dyn FileStore>,
}

impl PostgresClothingRepository {
    pub fn new(pool: sqlx::PgPool, files: Arc<dyn FileStore>) -> Self {
        Self { pool, files }
    }
}

#[async_trait]
impl ClothingRepository for PostgresClothingRepository {
    async fn find_all(&self) -> Result<Vec<ClothingItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClothingRow>(
            "SELECT id, legacy_id, kind, image_id, created_at, customer_id \
             FROM clothe ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ClothingItem::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ClothingItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ClothingRow>(
            "SELECT id, legacy_id, kind, image_id, created_at, customer_id \
             FROM clothe WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ClothingItem::from))
    }

    async fn add(&self, item: &NewClothingItem) -> Result<ClothingItem, RepositoryError> {
        let row = sqlx::query_as::<_, ClothingRow>(
            "INSERT INTO clothe (legacy_id, kind, customer_id) \
             VALUES ($1, $2, $3) \
             RETURNING id, legacy_id, kind, image_id, created_at, customer_id",
        )
        .bind(item.legacy_id)
        .bind(&item.kind)
        .bind(item.customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError> {
        super::attach_image(&self.pool, &self.files, "clothe", id, data, filename).await
    }
}
