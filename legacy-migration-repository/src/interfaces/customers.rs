//! This module defines the `CustomerRepository` trait, which provides an
//! interface for interacting with the underlying data store for customers.
use legacy_migration_shared::types::{Customer, FileId, NewCustomer};

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with stored customers.
///
/// Customers record their legacy id so later passes (encounters) can
/// resolve references to them through [`find_by_legacy_id`].
///
/// [`find_by_legacy_id`]: CustomerRepository::find_by_legacy_id
#[async_trait::async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns all stored customers ordered by id.
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Looks up a customer by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError>;

    /// Looks up a customer by the id it carried in the legacy API.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no stored customer records that legacy id.
    async fn find_by_legacy_id(&self, legacy_id: i32)
        -> Result<Option<Customer>, RepositoryError>;

    /// Inserts a customer and returns the complete stored row.
    async fn add(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError>;

    /// Stores image bytes and points the customer's `image_id` at them.
    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError>;
}
