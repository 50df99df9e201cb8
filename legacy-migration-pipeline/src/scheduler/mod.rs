//! This module defines the `Scheduler` that repeats migration cycles on a
//! fixed interval until it is shut down.
use tokio::sync::broadcast;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{error, info};

use crate::errors::OrchestratorError;
use crate::orchestrator::Orchestrator;

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between the starts of consecutive migration cycles.
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Cloneable handle that stops a running [`Scheduler`].
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    /// Triggers a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// `Scheduler` drives the orchestrator on a fixed cadence.
///
/// The first cycle starts immediately; later cycles start on the
/// configured interval. A cycle level failure ends the loop with an error
/// so dead credentials surface to the operator instead of being retried
/// for a day.
pub struct Scheduler {
    orchestrator: Orchestrator,
    config: SchedulerConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl Scheduler {
    /// Creates a new `Scheduler` instance with default configuration.
    pub fn new(orchestrator: Orchestrator) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            orchestrator,
            config: SchedulerConfig::default(),
            shutdown_tx,
        }
    }

    /// Creates a new `Scheduler` instance with custom configuration.
    pub fn with_config(orchestrator: Orchestrator, config: SchedulerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            orchestrator,
            config,
            shutdown_tx,
        }
    }

    /// Returns a handle that shuts this scheduler down when triggered.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }

    /// Runs migration cycles until shut down.
    ///
    /// Blocks until a shutdown is requested, Ctrl+C is received, or a cycle
    /// aborts with an error.
    pub async fn run(&self) -> Result<(), OrchestratorError> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut timer = interval(self.config.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    match self.orchestrator.run_cycle().await {
                        Ok(report) => {
                            info!(
                                migrated = report.migrated(),
                                complete = report.all_completed(),
                                next_cycle_in_secs = self.config.interval.as_secs(),
                                "migration cycle report"
                            );
                        }
                        Err(e) => {
                            error!(error = %e, "migration cycle aborted");
                            return Err(e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("scheduler shutdown requested");
                    return Ok(());
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("received shutdown signal");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use legacy_api::{MockLegacyApi, Session};

    use super::*;
    use crate::errors::MigratorError;
    use crate::migrators::{EntityKind, EntityMigrator, MigrationSummary};

    struct CountingMigrator {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EntityMigrator for CountingMigrator {
        fn entity(&self) -> EntityKind {
            EntityKind::Tips
        }

        async fn run(&self, _session: &Session) -> Result<MigrationSummary, MigratorError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(MigrationSummary::default())
        }
    }

    fn scheduler_with(runs: Arc<AtomicUsize>, interval: Duration) -> Scheduler {
        let orchestrator = Orchestrator::new(
            Arc::new(MockLegacyApi::new()),
            vec![Box::new(CountingMigrator { runs })],
        );
        Scheduler::with_config(orchestrator, SchedulerConfig { interval })
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_first_cycle_immediately_then_on_interval() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = scheduler_with(runs.clone(), Duration::from_secs(3600));
        let handle = scheduler.shutdown_handle();

        let task = tokio::spawn(async move { scheduler.run().await });

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        handle.shutdown();
        let result = task.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_start_cycle_before_interval_elapses() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = scheduler_with(runs.clone(), Duration::from_secs(3600));
        let handle = scheduler.shutdown_handle();

        let task = tokio::spawn(async move { scheduler.run().await });

        tokio::time::sleep(Duration::from_secs(1800)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        handle.shutdown();
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_with_error_when_authentication_fails() {
        let api = Arc::new(MockLegacyApi::new());
        api.reject_login("expired group token");

        let runs = Arc::new(AtomicUsize::new(0));
        let orchestrator = Orchestrator::new(
            api,
            vec![Box::new(CountingMigrator { runs: runs.clone() })],
        );
        let scheduler = Scheduler::new(orchestrator);

        let result = scheduler.run().await;
        assert!(matches!(result, Err(OrchestratorError::Authentication(_))));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_handle_stops_the_loop() {
        let runs = Arc::new(AtomicUsize::new(0));
        let scheduler = scheduler_with(runs.clone(), Duration::from_secs(3600));
        let handle = scheduler.shutdown_handle();

        let task = tokio::spawn(async move { scheduler.run().await });
        tokio::time::sleep(Duration::from_secs(10)).await;

        handle.shutdown();
        let result = task.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
