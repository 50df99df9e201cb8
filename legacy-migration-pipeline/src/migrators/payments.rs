//! Nested migration pass for a customer's payment history.

use std::sync::Arc;

use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::PaymentRepository;
use legacy_migration_shared::types::{IdPair, NewPayment};

use crate::errors::MigratorError;

/// Copies the payment history of one customer at a time.
///
/// Like [`super::ClothesMigrator`] this is driven by the customers pass:
/// the legacy API only exposes payment histories per customer.
pub struct PaymentsMigrator {
    api: Arc<dyn LegacyApi>,
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentsMigrator {
    /// Creates a new `PaymentsMigrator` instance.
    pub fn new(api: Arc<dyn LegacyApi>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { api, payments }
    }

    /// Migrates every payment of the given customer.
    ///
    /// Payments are fetched under the customer's legacy id and stored
    /// under the customer's new id.
    pub async fn migrate_for_customer(
        &self,
        session: &Session,
        customer: IdPair,
    ) -> Result<(), MigratorError> {
        let history = self.api.customer_payments(session, customer.old).await?;
        for payment in history {
            self.payments
                .add(&NewPayment {
                    legacy_id: Some(payment.id),
                    date: payment.date,
                    payment_method: payment.payment_method,
                    amount: payment.amount,
                    comment: payment.comment,
                    customer_id: customer.new,
                })
                .await?;
        }
        Ok(())
    }
}
