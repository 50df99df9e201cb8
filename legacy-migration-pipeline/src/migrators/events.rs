//! Migration pass for planned events.

use std::sync::Arc;

use async_trait::async_trait;
use legacy_api::{LegacyApi, Session};
use legacy_migration_repository::{EmployeeRepository, EventRepository};
use legacy_migration_shared::types::NewEvent;
use tracing::warn;

use super::{EntityKind, EntityMigrator, MigrationSummary};
use crate::errors::MigratorError;
use crate::progress::ProgressReporter;

/// Copies every legacy event into the new store.
///
/// Events reference their hosting employee by legacy id, resolved through
/// the employee repository's legacy id lookup. The pass therefore depends
/// on the employees pass having run first.
pub struct EventsMigrator {
    api: Arc<dyn LegacyApi>,
    events: Arc<dyn EventRepository>,
    employees: Arc<dyn EmployeeRepository>,
    progress: Arc<dyn ProgressReporter>,
}

const DEPENDENCIES: &[EntityKind] = &[EntityKind::Employees];

impl EventsMigrator {
    /// Creates a new `EventsMigrator` instance.
    pub fn new(
        api: Arc<dyn LegacyApi>,
        events: Arc<dyn EventRepository>,
        employees: Arc<dyn EmployeeRepository>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            api,
            events,
            employees,
            progress,
        }
    }

    async fn migrate_one(&self, session: &Session, legacy_id: i32) -> Result<(), MigratorError> {
        let detail = self.api.event(session, legacy_id).await?;
        let employee = self
            .employees
            .find_by_legacy_id(detail.employee_id)
            .await?
            .ok_or(MigratorError::UnresolvedParent {
                entity: "event",
                legacy_id,
                parent: "employee",
            })?;

        self.events
            .add(&NewEvent {
                name: detail.name,
                date: detail.date,
                max_participants: detail.max_participants,
                location_x: detail.location_x,
                location_y: detail.location_y,
                kind: detail.kind,
                employee_id: employee.id,
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EntityMigrator for EventsMigrator {
    fn entity(&self) -> EntityKind {
        EntityKind::Events
    }

    fn dependencies(&self) -> &[EntityKind] {
        DEPENDENCIES
    }

    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError> {
        let listed = self.api.events(session).await?;
        let mut summary = MigrationSummary {
            total: listed.len(),
            ..Default::default()
        };

        let task = self.progress.start("events", listed.len());
        for event in listed {
            match self.migrate_one(session, event.id).await {
                Ok(()) => {
                    summary.migrated += 1;
                    self.progress.increment(&task);
                }
                Err(error) => {
                    warn!(event = event.id, error = %error, "skipping event");
                    summary.skipped += 1;
                }
            }
        }
        self.progress.complete(task);

        Ok(summary)
    }
}
