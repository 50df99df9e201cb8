//! Interface for the payment store.
use legacy_migration_shared::types::{NewPayment, Payment};

use crate::errors::RepositoryError;

/// Interface for interacting with stored payments.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Returns all stored payments ordered by id.
    async fn find_all(&self) -> Result<Vec<Payment>, RepositoryError>;

    /// Looks up a payment by its store-assigned id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, RepositoryError>;

    /// Inserts a payment and returns the complete stored row.
    async fn add(&self, payment: &NewPayment) -> Result<Payment, RepositoryError>;
}
