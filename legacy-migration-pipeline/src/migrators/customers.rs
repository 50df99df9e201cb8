//! Migration pass for customers and the records nested under them.

use std::sync::Arc;

use async_trait::async_trait;
use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::{ClothingRepository, CustomerRepository, PaymentRepository};
use legacy_migration_shared::types::{IdPair, NewCustomer};
use tracing::warn;

use super::{ClothesMigrator, EntityKind, EntityMigrator, MigrationSummary, PaymentsMigrator};
use crate::errors::MigratorError;
use crate::progress::ProgressReporter;

/// Copies every legacy customer into the new store, together with their
/// profile photo, wardrobe and payment history.
///
/// The nested records exist only relative to a customer in the legacy API,
/// so this pass drives [`ClothesMigrator`] and [`PaymentsMigrator`] once
/// per migrated customer, handing each the customer's [`IdPair`]. Nested
/// failures are logged and cost only the nested records; the customer row
/// itself stays.
pub struct CustomersMigrator {
    api: Arc<dyn LegacyApi>,
    customers: Arc<dyn CustomerRepository>,
    clothes: ClothesMigrator,
    payments: PaymentsMigrator,
    progress: Arc<dyn ProgressReporter>,
}

impl CustomersMigrator {
    /// Creates a new `CustomersMigrator` instance.
    pub fn new(
        api: Arc<dyn LegacyApi>,
        customers: Arc<dyn CustomerRepository>,
        clothing: Arc<dyn ClothingRepository>,
        payments: Arc<dyn PaymentRepository>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            clothes: ClothesMigrator::new(api.clone(), clothing),
            payments: PaymentsMigrator::new(api.clone(), payments),
            api,
            customers,
            progress,
        }
    }

    async fn migrate_one(&self, session: &Session, legacy_id: i32) -> Result<(), MigratorError> {
        let detail = self.api.customer(session, legacy_id).await?;
        let stored = self
            .customers
            .add(&NewCustomer {
                legacy_id: Some(legacy_id),
                email: detail.email,
                name: detail.name,
                surname: detail.surname,
                birth_date: detail.birth_date,
                gender: detail.gender,
                description: detail.description,
                astrological_sign: detail.astrological_sign,
                phone_number: detail.phone_number,
                address: detail.address,
                employee_id: None,
            })
            .await?;

        let ids = IdPair {
            old: legacy_id,
            new: stored.id,
        };
        self.copy_image(session, ids).await;
        if let Err(error) = self.clothes.migrate_for_customer(session, ids).await {
            warn!(customer = legacy_id, error = %error, "failed to migrate customer wardrobe");
        }
        if let Err(error) = self.payments.migrate_for_customer(session, ids).await {
            warn!(customer = legacy_id, error = %error, "failed to migrate customer payments");
        }
        Ok(())
    }

    /// Copies the profile photo. Image failures only cost the asset, never
    /// the already inserted customer row.
    async fn copy_image(&self, session: &Session, ids: IdPair) {
        let bytes = match self.api.customer_image(session, ids.old).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(customer = ids.old, error = %error, "skipping customer image");
                return;
            }
        };

        let filename = format!("customer_{}", ids.new);
        if let Err(error) = self.customers.attach_image(ids.new, bytes, &filename).await {
            warn!(customer = ids.old, error = %error, "failed to store customer image");
        }
    }
}

#[async_trait]
impl EntityMigrator for CustomersMigrator {
    fn entity(&self) -> EntityKind {
        EntityKind::Customers
    }

    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError> {
        let listed = self.api.customers(session).await?;
        let mut summary = MigrationSummary {
            total: listed.len(),
            ..Default::default()
        };

        let task = self.progress.start("customers", listed.len());
        for customer in listed {
            match self.migrate_one(session, customer.id).await {
                Ok(()) => {
                    summary.migrated += 1;
                    self.progress.increment(&task);
                }
                Err(error) => {
                    warn!(customer = customer.id, error = %error, "skipping customer");
                    summary.skipped += 1;
                }
            }
        }
        self.progress.complete(task);

        Ok(summary)
    }
}
