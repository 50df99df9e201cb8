//! Error types for the per-entity migrators.
//! Defines the failures surfaced while copying legacy records into the
//! new store.
use legacy_api::ApiError;
use legacy_migration_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while migrating an entity family.
///
/// A migrator returns one of these for the whole pass when listing the
/// family fails, and per record when fetching, resolving or inserting a
/// single record fails.
#[derive(Debug, Error)]
pub enum MigratorError {
    #[error("Api error: {0}")]
    Api(#[from] ApiError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{entity} {legacy_id} references a {parent} that was not migrated")]
    UnresolvedParent {
        entity: &'static str,
        legacy_id: i32,
        parent: &'static str,
    },
}
