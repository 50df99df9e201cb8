//! Error types for the migration orchestrator.
//! Defines the conditions that abort a whole migration cycle instead of a
//! single entity pass.
use legacy_api::ApiError;
use thiserror::Error;

use crate::migrators::EntityKind;

/// Represents errors that abort a migration cycle.
///
/// Entity level failures are reported through the cycle report instead;
/// only authentication failures and invalid migration plans stop a cycle
/// before it completes.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Logging in to the legacy API failed, either in transport or because
    /// the credentials were rejected.
    #[error("Authentication failed: {0}")]
    Authentication(#[source] ApiError),

    /// A migrator is scheduled before one of its dependencies.
    #[error("{entity} is planned before its dependency {dependency}")]
    UnsatisfiedDependency {
        entity: EntityKind,
        dependency: EntityKind,
    },

    /// The same entity family appears twice in the plan.
    #[error("{0} appears more than once in the migration plan")]
    DuplicateEntity(EntityKind),
}
