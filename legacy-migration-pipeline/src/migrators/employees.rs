//! Migration pass for the employee directory.

use std::sync::Arc;

use async_trait::async_trait;
use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::EmployeeRepository;
use legacy_migration_shared::types::{IdPair, NewEmployee};
use tracing::warn;

use super::{EntityKind, EntityMigrator, MigrationSummary};
use crate::errors::MigratorError;
use crate::progress::ProgressReporter;

/// Copies every legacy employee and their photo into the new store.
pub struct EmployeesMigrator {
    api: Arc<dyn LegacyApi>,
    employees: Arc<dyn EmployeeRepository>,
    progress: Arc<dyn ProgressReporter>,
}

impl EmployeesMigrator {
    /// Creates a new `EmployeesMigrator` instance.
    pub fn new(
        api: Arc<dyn LegacyApi>,
        employees: Arc<dyn EmployeeRepository>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            api,
            employees,
            progress,
        }
    }

    async fn migrate_one(&self, session: &Session, legacy_id: i32) -> Result<(), MigratorError> {
        let detail = self.api.employee(session, legacy_id).await?;
        let stored = self
            .employees
            .add(&NewEmployee {
                legacy_id: Some(legacy_id),
                email: detail.email,
                name: detail.name,
                surname: detail.surname,
                birth_date: detail.birth_date,
                gender: detail.gender,
                work: detail.work,
            })
            .await?;

        self.copy_image(
            session,
            IdPair {
                old: legacy_id,
                new: stored.id,
            },
        )
        .await;
        Ok(())
    }

    /// Copies the employee photo. Image failures only cost the asset, never
    /// the already inserted employee row.
    async fn copy_image(&self, session: &Session, ids: IdPair) {
        let bytes = match self.api.employee_image(session, ids.old).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(employee = ids.old, error = %error, "skipping employee image");
                return;
            }
        };

        let filename = format!("employee_{}", ids.new);
        if let Err(error) = self.employees.attach_image(ids.new, bytes, &filename).await {
            warn!(employee = ids.old, error = %error, "failed to store employee image");
        }
    }
}

#[async_trait]
impl EntityMigrator for EmployeesMigrator {
    fn entity(&self) -> EntityKind {
        EntityKind::Employees
    }

    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError> {
        let listed = self.api.employees(session).await?;
        let mut summary = MigrationSummary {
            total: listed.len(),
            ..Default::default()
        };

        let task = self.progress.start("employees", listed.len());
        for employee in listed {
            match self.migrate_one(session, employee.id).await {
                Ok(()) => {
                    summary.migrated += 1;
                    self.progress.increment(&task);
                }
                Err(error) => {
                    warn!(employee = employee.id, error = %error, "skipping employee");
                    summary.skipped += 1;
                }
            }
        }
        self.progress.complete(task);

        Ok(summary)
    }
}
