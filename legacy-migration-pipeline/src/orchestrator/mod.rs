//! This module defines the `Orchestrator` responsible for running one
//! migration cycle end to end.
//! It validates the migration plan, authenticates against the legacy API
//! once, and runs every migrator in plan order, isolating entity level
//! failures from each other.
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use legacy_api::LegacyApi;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};

use crate::errors::{MigratorError, OrchestratorError};
use crate::migrators::{EntityKind, EntityMigrator, MigrationSummary};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Pause inserted before each migration pass, keeping the request rate
    /// against the legacy API down.
    pub pacing: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(2),
        }
    }
}

/// Outcome of one migrator within a cycle.
#[derive(Debug)]
pub struct EntityOutcome {
    pub entity: EntityKind,
    pub result: Result<MigrationSummary, MigratorError>,
}

/// Report for one full migration cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// When the cycle logged in and started migrating.
    pub started_at: DateTime<Utc>,
    /// Per-migrator outcomes, in plan order.
    pub outcomes: Vec<EntityOutcome>,
}

impl CycleReport {
    /// Total number of records written across all passes.
    pub fn migrated(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .map(|summary| summary.migrated)
            .sum()
    }

    /// True when every pass completed, even if some records were skipped.
    pub fn all_completed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }
}

/// `Orchestrator` runs a full migration cycle over an ordered plan of
/// entity migrators.
///
/// A cycle authenticates once and reuses the session across every pass.
/// A migrator that fails is reported and the cycle moves on to the next
/// one; only authentication failures abort the cycle itself.
pub struct Orchestrator {
    api: Arc<dyn LegacyApi>,
    migrators: Vec<Box<dyn EntityMigrator>>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates a new `Orchestrator` instance.
    ///
    /// # Arguments
    ///
    /// * `api` - The legacy API client used for login.
    /// * `migrators` - The migration plan, in execution order.
    ///
    /// # Returns
    ///
    /// A new `Orchestrator` instance with default configuration.
    pub fn new(api: Arc<dyn LegacyApi>, migrators: Vec<Box<dyn EntityMigrator>>) -> Self {
        Self {
            api,
            migrators,
            config: OrchestratorConfig::default(),
        }
    }

    /// Creates a new `Orchestrator` instance with custom configuration.
    pub fn with_config(
        api: Arc<dyn LegacyApi>,
        migrators: Vec<Box<dyn EntityMigrator>>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            api,
            migrators,
            config,
        }
    }

    /// Checks that the plan lists no entity twice and runs no migrator
    /// before one of its dependencies.
    pub fn validate_plan(&self) -> Result<(), OrchestratorError> {
        let mut seen: HashSet<EntityKind> = HashSet::new();
        for migrator in &self.migrators {
            let entity = migrator.entity();
            for dependency in migrator.dependencies() {
                if !seen.contains(dependency) {
                    return Err(OrchestratorError::UnsatisfiedDependency {
                        entity,
                        dependency: *dependency,
                    });
                }
            }
            if !seen.insert(entity) {
                return Err(OrchestratorError::DuplicateEntity(entity));
            }
        }
        Ok(())
    }

    /// Runs one full migration cycle.
    ///
    /// The plan is validated and the service account logged in before any
    /// migrator runs, so a bad plan or dead credentials never leave a
    /// half-migrated cycle behind. Entity level failures are recorded in
    /// the report without stopping the remaining passes.
    ///
    /// # Returns
    ///
    /// A `Result` with the cycle report, or an `OrchestratorError` when the
    /// plan is invalid or authentication fails.
    pub async fn run_cycle(&self) -> Result<CycleReport, OrchestratorError> {
        self.validate_plan()?;

        let session = self
            .api
            .login()
            .await
            .map_err(OrchestratorError::Authentication)?;

        let started_at = Utc::now();
        info!(passes = self.migrators.len(), "migration cycle started");

        let mut outcomes = Vec::with_capacity(self.migrators.len());
        for migrator in &self.migrators {
            sleep(self.config.pacing).await;

            let entity = migrator.entity();
            let result = migrator.run(&session).await;
            match &result {
                Ok(summary) => {
                    info!(
                        entity = %entity,
                        total = summary.total,
                        migrated = summary.migrated,
                        skipped = summary.skipped,
                        "migration pass finished"
                    );
                }
                Err(error) => {
                    warn!(entity = %entity, error = %error, "migration pass failed");
                }
            }
            outcomes.push(EntityOutcome { entity, result });
        }

        info!("migration cycle finished");
        Ok(CycleReport {
            started_at,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use legacy_api::{MockLegacyApi, Session};

    use super::*;

    struct StubMigrator {
        entity: EntityKind,
        dependencies: Vec<EntityKind>,
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EntityMigrator for StubMigrator {
        fn entity(&self) -> EntityKind {
            self.entity
        }

        fn dependencies(&self) -> &[EntityKind] {
            &self.dependencies
        }

        async fn run(&self, _session: &Session) -> Result<MigrationSummary, MigratorError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(MigrationSummary::default())
        }
    }

    fn stub(entity: EntityKind, dependencies: &[EntityKind]) -> Box<dyn EntityMigrator> {
        Box::new(StubMigrator {
            entity,
            dependencies: dependencies.to_vec(),
            runs: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn counted(entity: EntityKind, runs: Arc<AtomicUsize>) -> Box<dyn EntityMigrator> {
        Box::new(StubMigrator {
            entity,
            dependencies: Vec::new(),
            runs,
        })
    }

    #[tokio::test]
    async fn test_validate_plan_accepts_dependency_order() {
        let orchestrator = Orchestrator::new(
            Arc::new(MockLegacyApi::new()),
            vec![
                stub(EntityKind::Employees, &[]),
                stub(EntityKind::Customers, &[]),
                stub(EntityKind::Encounters, &[EntityKind::Customers]),
                stub(EntityKind::Tips, &[]),
                stub(EntityKind::Events, &[EntityKind::Employees]),
            ],
        );

        assert!(orchestrator.validate_plan().is_ok());
    }

    #[tokio::test]
    async fn test_validate_plan_rejects_dependency_scheduled_later() {
        let orchestrator = Orchestrator::new(
            Arc::new(MockLegacyApi::new()),
            vec![
                stub(EntityKind::Encounters, &[EntityKind::Customers]),
                stub(EntityKind::Customers, &[]),
            ],
        );

        let error = orchestrator.validate_plan().unwrap_err();
        assert!(matches!(
            error,
            OrchestratorError::UnsatisfiedDependency {
                entity: EntityKind::Encounters,
                dependency: EntityKind::Customers,
            }
        ));
    }

    #[tokio::test]
    async fn test_validate_plan_rejects_duplicate_entity() {
        let orchestrator = Orchestrator::new(
            Arc::new(MockLegacyApi::new()),
            vec![stub(EntityKind::Tips, &[]), stub(EntityKind::Tips, &[])],
        );

        let error = orchestrator.validate_plan().unwrap_err();
        assert!(matches!(
            error,
            OrchestratorError::DuplicateEntity(EntityKind::Tips)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_stops_before_migrating_when_login_fails() {
        let api = Arc::new(MockLegacyApi::new());
        api.reject_login("invalid group token");

        let runs = Arc::new(AtomicUsize::new(0));
        let orchestrator = Orchestrator::new(
            api,
            vec![counted(EntityKind::Employees, runs.clone())],
        );

        let error = orchestrator.run_cycle().await.unwrap_err();
        assert!(matches!(error, OrchestratorError::Authentication(_)));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_runs_every_migrator_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let orchestrator = Orchestrator::new(
            Arc::new(MockLegacyApi::new()),
            vec![
                counted(EntityKind::Employees, runs.clone()),
                counted(EntityKind::Customers, runs.clone()),
                counted(EntityKind::Tips, runs.clone()),
            ],
        );

        let report = orchestrator.run_cycle().await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 3);
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.all_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycle_rejects_invalid_plan_without_login() {
        let api = Arc::new(MockLegacyApi::new());
        let orchestrator = Orchestrator::new(
            api.clone(),
            vec![stub(EntityKind::Events, &[EntityKind::Employees])],
        );

        let error = orchestrator.run_cycle().await.unwrap_err();
        assert!(matches!(
            error,
            OrchestratorError::UnsatisfiedDependency { .. }
        ));
        assert!(api.requests().is_empty());
    }
}
