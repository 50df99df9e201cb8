//! Error types for the entity repositories.
//! Defines specific errors that can occur during store operations on
//! migrated entities.
use thiserror::Error;

use crate::errors::FileStoreError;

/// Represents errors that can occur within an entity repository.
///
/// This enum consolidates the error conditions of store interactions, such
/// as SQLx errors during database operations and file store failures
/// surfaced while attaching images.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("File store error: {0}")]
    FileStore(#[from] FileStoreError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Create an unavailability error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
