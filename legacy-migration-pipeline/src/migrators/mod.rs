//! Per-entity migrators.
//!
//! Each migrator copies one legacy entity family into the new store. A pass
//! lists the family, fetches each record's detail, resolves references to
//! records migrated in earlier passes, inserts the record, and finally
//! copies any attached image. A record that fails is logged and skipped so
//! one bad record never aborts the rest of its family.

mod clothes;
mod customers;
mod employees;
mod encounters;
mod events;
mod payments;
mod tips;

pub use clothes::ClothesMigrator;
pub use customers::CustomersMigrator;
pub use employees::EmployeesMigrator;
pub use encounters::EncountersMigrator;
pub use events::EventsMigrator;
pub use payments::PaymentsMigrator;
pub use tips::TipsMigrator;

use std::fmt;

use async_trait::async_trait;
use legacy_api::Session;

use crate::errors::MigratorError;

/// The entity families the migration knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Employees,
    Customers,
    Clothes,
    Payments,
    Encounters,
    Events,
    Tips,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Employees => "employees",
            EntityKind::Customers => "customers",
            EntityKind::Clothes => "clothes",
            EntityKind::Payments => "payments",
            EntityKind::Encounters => "encounters",
            EntityKind::Events => "events",
            EntityKind::Tips => "tips",
        };
        write!(f, "{name}")
    }
}

/// Counters for one migration pass over an entity family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Records the legacy API listed for the family.
    pub total: usize,
    /// Records written to the new store.
    pub migrated: usize,
    /// Records dropped after a record level failure.
    pub skipped: usize,
}

/// A migration pass over one legacy entity family.
///
/// Implementations fetch the family from the legacy API and write it to
/// the new store. `dependencies` names the families whose rows must
/// already be present when `run` is called; the orchestrator checks the
/// plan against them before logging in.
#[async_trait]
pub trait EntityMigrator: Send + Sync {
    /// The family this migrator copies.
    fn entity(&self) -> EntityKind;

    /// Families that must be migrated before this one.
    fn dependencies(&self) -> &[EntityKind] {
        &[]
    }

    /// Runs one full pass using the given authenticated session.
    ///
    /// # Arguments
    ///
    /// * `session` - The session obtained by the orchestrator's login.
    ///
    /// # Returns
    ///
    /// A `Result` with the pass counters, or a `MigratorError` when the
    /// family could not be listed at all.
    async fn run(&self, session: &Session) -> Result<MigrationSummary, MigratorError>;
}
