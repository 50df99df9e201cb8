//! PostgreSQL-backed file store keeping image bytes in a bytea table.
use async_trait::async_trait;
use uuid::Uuid;

use legacy_migration_shared::types::FileId;

use crate::errors::FileStoreError;
use crate::interfaces::{FileStore, StoredFile};

#[derive(sqlx::FromRow)]
struct FileRow {
    id: FileId,
    filename: String,
    data: Vec<u8>,
}

pub struct PostgresFileStore {
    pool: sqlx::PgPool,
}

impl PostgresFileStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PostgresFileStore {
    async fn store(&self, filename: &str, data: Vec<u8>) -> Result<FileId, FileStoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO stored_file (id, filename, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(filename)
            .bind(&data)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn retrieve(&self, id: FileId) -> Result<Option<StoredFile>, FileStoreError> {
        let row = sqlx::query_as::<_, FileRow>(
            "SELECT id, filename, data FROM stored_file WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| StoredFile {
            id: r.id,
            filename: r.filename,
            data: r.data,
        }))
    }

    async fn delete(&self, id: FileId) -> Result<(), FileStoreError> {
        sqlx::query("DELETE FROM stored_file WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
