//! PostgreSQL implementations of the repository interfaces.
//!
//! All repositories share one [`sqlx::PgPool`]. Queries are runtime-checked
//! (`sqlx::query` / `query_as` with binds), so building this crate does not
//! need a live database.
mod clothing_repository;
mod customer_repository;
mod employee_repository;
mod encounter_repository;
mod event_repository;
mod file_store;
mod payment_repository;
mod schema;
mod tip_repository;

pub use clothing_repository::PostgresClothingRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use employee_repository::PostgresEmployeeRepository;
pub use encounter_repository::PostgresEncounterRepository;
pub use event_repository::PostgresEventRepository;
pub use file_store::PostgresFileStore;
pub use payment_repository::PostgresPaymentRepository;
pub use schema::ensure_schema;
pub use tip_repository::PostgresTipRepository;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::warn;

use legacy_migration_shared::types::FileId;

use crate::errors::RepositoryError;
use crate::interfaces::FileStore;

const MAX_CONNECTIONS: u32 = 10;

/// Connect a pool suitable for sharing across all repositories.
pub async fn connect(url: &str) -> Result<sqlx::PgPool, RepositoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(url)
        .await?;
    Ok(pool)
}

/// Store image bytes, then point `<table>.image_id` at them.
///
/// The row update runs in its own transaction. If the update or the commit
/// fails, the just-stored file is deleted again: a failed attach leaves
/// neither a dangling reference nor an orphaned file.
pub(crate) async fn attach_image(
    pool: &sqlx::PgPool,
    files: &Arc<dyn FileStore>,
    table: &str,
    id: i32,
    data: Vec<u8>,
    filename: &str,
) -> Result<FileId, RepositoryError> {
    let file_id = files.store(filename, data).await?;

    let mut tx = pool.begin().await?;
    let update = format!("UPDATE {table} SET image_id = $1 WHERE id = $2");
    if let Err(e) = sqlx::query(&update)
        .bind(file_id)
        .bind(id)
        .execute(&mut *tx)
        .await
    {
        discard_file(files, file_id).await;
        return Err(e.into());
    }
    if let Err(e) = tx.commit().await {
        discard_file(files, file_id).await;
        return Err(e.into());
    }

    Ok(file_id)
}

async fn discard_file(files: &Arc<dyn FileStore>, file_id: FileId) {
    if let Err(e) = files.delete(file_id).await {
        warn!(file_id = %file_id, error = %e, "could not delete file after failed image attach");
    }
}
