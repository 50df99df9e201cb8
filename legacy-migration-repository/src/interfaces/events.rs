//! Interface for the event store.
use legacy_migration_shared::types::{Event, NewEvent};

use crate::errors::RepositoryError;

/// Interface for interacting with stored events.
#[async_trait::async_trait]
pub trait EventRepository: Send + Sync {
    /// Returns all stored events ordered by id.
    async fn find_all(&self) -> Result<Vec<Event>, RepositoryError>;

    /// Looks up an event by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RepositoryError>;

    /// Inserts an event and returns the complete stored row.
    ///
    /// `employee_id` must already hold the new-store id of the employee.
    async fn add(&self, event: &NewEvent) -> Result<Event, RepositoryError>;
}
