//! Interface for the binary file store holding migrated images.
use legacy_migration_shared::types::FileId;

use crate::errors::FileStoreError;

/// A stored binary asset.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub id: FileId,
    pub filename: String,
    pub data: Vec<u8>,
}

/// Interface for storing and retrieving binary assets.
///
/// The asset phase of a migration stores image bytes here and records the
/// returned [`FileId`] on the owning entity row.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Stores the given bytes under a fresh id.
    async fn store(&self, filename: &str, data: Vec<u8>) -> Result<FileId, FileStoreError>;

    /// Retrieves a stored file, or `None` if the id is unknown.
    async fn retrieve(&self, id: FileId) -> Result<Option<StoredFile>, FileStoreError>;

    /// Deletes a stored file. Deleting an unknown id is not an error.
    async fn delete(&self, id: FileId) -> Result<(), FileStoreError>;
}
