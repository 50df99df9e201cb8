//! Error types for the binary file store.
use legacy_migration_shared::types::FileId;
use thiserror::Error;

/// Represents errors that can occur within the file store.
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("File not found: {0}")]
    NotFound(FileId),
}
