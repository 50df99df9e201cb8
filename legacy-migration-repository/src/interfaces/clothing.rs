//! Interface for the clothing item store.
use legacy_migration_shared::types::{ClothingItem, FileId, NewClothingItem};

use crate::errors::RepositoryError;

/// Interface for interacting with stored clothing items.
#[async_trait::async_trait]
pub trait ClothingRepository: Send + Sync {
    /// Returns all stored clothing items ordered by id.
    async fn find_all(&self) -> Result<Vec<ClothingItem>, RepositoryError>;

    /// Looks up a clothing item by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<ClothingItem>, RepositoryError>;

    /// Inserts a clothing item and returns the complete stored row.
    async fn add(&self, item: &NewClothingItem) -> Result<ClothingItem, RepositoryError>;

    /// Stores image bytes and points the item's `image_id` at them.
    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError>;
}
