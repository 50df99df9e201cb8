//! Error types for the legacy migration application.
//! Defines the errors that can occur while configuring the service and
//! consolidates the cycle level errors of the pipeline.
use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the store the migration writes into.
    #[error("Repository error: {0}")]
    Repository(#[from] legacy_migration_repository::RepositoryError),

    /// Error that aborted a migration cycle.
    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] legacy_migration_pipeline::errors::OrchestratorError),
}

impl MigrationError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
