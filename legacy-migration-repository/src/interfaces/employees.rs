//! This module defines the `EmployeeRepository` trait, which provides an
//! interface for interacting with the underlying data store for employees.
//! It abstracts the database operations for persistence and retrieval.
use legacy_migration_shared::types::{Employee, FileId, NewEmployee};

use crate::errors::RepositoryError;

/// A trait that defines the interface for interacting with stored employees.
///
/// Implementors of this trait provide methods for inserting employees,
/// looking them up by new or legacy id, and attaching profile images.
#[async_trait::async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Returns all stored employees ordered by id.
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError>;

    /// Looks up an employee by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, RepositoryError>;

    /// Looks up an employee by the id it carried in the legacy API.
    ///
    /// This is the cross-pass resolution step: later passes that reference
    /// an employee only know its legacy id and use this lookup to find the
    /// migrated row.
    ///
    /// # Arguments
    ///
    /// * `legacy_id` - The identifier the employee carried in the legacy API.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no stored employee records that legacy id.
    async fn find_by_legacy_id(&self, legacy_id: i32)
        -> Result<Option<Employee>, RepositoryError>;

    /// Inserts an employee and returns the complete stored row.
    ///
    /// The returned row carries the store-assigned id, which callers pair
    /// with the legacy id for nested migrations.
    async fn add(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError>;

    /// Stores image bytes and points the employee's `image_id` at them.
    ///
    /// If updating the row fails, the just-stored file is deleted again and
    /// the error is propagated; the store never keeps orphaned assets.
    async fn attach_image(
        &self,
        id: i32,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<FileId, RepositoryError>;
}
