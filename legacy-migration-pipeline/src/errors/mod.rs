mod migrator;
mod orchestrator;

pub use migrator::MigratorError;
pub use orchestrator::OrchestratorError;
