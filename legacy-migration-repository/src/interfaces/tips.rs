//! Interface for the tip store.
use legacy_migration_shared::types::{NewTip, Tip};

use crate::errors::RepositoryError;

/// Interface for interacting with stored tips.
#[async_trait::async_trait]
pub trait TipRepository: Send + Sync {
    /// Returns all stored tips ordered by id.
    async fn find_all(&self) -> Result<Vec<Tip>, RepositoryError>;

    /// Looks up a tip by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Tip>, RepositoryError>;

    /// Inserts a tip and returns the complete stored row.
    async fn add(&self, tip: &NewTip) -> Result<Tip, RepositoryError>;
}
