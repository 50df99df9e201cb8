//! Migration pass for dating encounters.

use std::sync::Arc;

use async_trait::async_trait;
use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::{CustomerRepository, EncounterRepository};
use legacy_migration_shared::types::NewEncounter;
use tracing::warn;

use super::{EntityKind, EntityMigrator, MigrationSummary};
use crate::errors::MigratorError;
use crate::progress::ProgressReporter;

/// Copies every legacy encounter into the new store.
///
/// Encounters reference their customer by legacy id. The reference is
/// resolved through the customer repository's legacy id lookup, which is
/// why this pass depends on the customers pass having run first.
pub struct EncountersMigrator {
    api: Arc<dyn LegacyApi>,
    encounters: Arc<dyn EncounterRepository>,
    customers: Arc<dyn CustomerRepository>,
    progress: Arc<dyn ProgressReporter>,
}

const DEPENDENCIES: &[EntityKind] = &[EntityKind::Customers];

impl EncountersMigrator {
    /// Creates a new `EncountersMigrator` instance.
    pub fn new(
        api: Arc<dyn LegacyApi>,
        encounters: Arc<dyn EncounterRepository>,
        customers: Arc<dyn CustomerRepository>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            api,
            encounters,
            customers,
            progress,
        }
    }

    async fn migrate_one(&self, session: &Session, legacy_id: i32) -> Result<(), MigratorError> {
        let detail = self.api.encounter(session, legacy_id).await?;
        let customer = self
            .customers
            .find_by_legacy_id(detail.customer_id)
            .await?
            .ok_or(MigratorError::UnresolvedParent {
                entity: "encounter",
                legacy_id,
                parent: "customer",
            })?;

        self.encounters
            .add(&NewEncounter {
                date: detail.date,
                rating: detail.rating,
                comment: detail.comment,
                source: detail.source,
                customer_id: customer.id,
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EntityMigrator for EncountersMigrator {
    fn entity(&self) -> EntityKind {
        EntityKind::Encounters
    }

    fn dependencies(&self) -> &[EntityKind] {
        DEPENDENCIES
    }

    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError> {
        let listed = self.api.encounters(session).await?;
        let mut summary = MigrationSummary {
            total: listed.len(),
            ..Default::default()
        };

        let task = self.progress.start("encounters", listed.len());
        for encounter in listed {
            match self.migrate_one(session, encounter.id).await {
                Ok(()) => {
                    summary.migrated += 1;
                    self.progress.increment(&task);
                }
                Err(error) => {
                    warn!(encounter = encounter.id, error = %error, "skipping encounter");
                    summary.skipped += 1;
                }
            }
        }
        self.progress.complete(task);

        Ok(summary)
    }
}
