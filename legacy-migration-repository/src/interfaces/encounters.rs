//! Interface for the encounter store.
use legacy_migration_shared::types::{Encounter, NewEncounter};

use crate::errors::RepositoryError;

/// Interface for interacting with stored encounters.
#[async_trait::async_trait]
pub trait EncounterRepository: Send + Sync {
    /// Returns all stored encounters ordered by id.
    async fn find_all(&self) -> Result<Vec<Encounter>, RepositoryError>;

    /// Looks up an encounter by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Encounter>, RepositoryError>;

    /// Inserts an encounter and returns the complete stored row.
    ///
    /// `customer_id` must already hold the new-store id of the customer.
    async fn add(&self, encounter: &NewEncounter) -> Result<Encounter, RepositoryError>;
}
