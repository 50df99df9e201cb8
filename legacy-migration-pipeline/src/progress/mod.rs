//! Progress reporting for migration passes.
//!
//! Migrators publish coarse progress through the [`ProgressReporter`] trait
//! so the binary decides how to surface it. [`LogProgress`] forwards to the
//! tracing subscriber; [`RecordingProgress`] captures every notification
//! for assertions in tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

/// Identifies one tracked migration pass.
///
/// Handles are issued by [`ProgressReporter::start`] and stay valid until
/// handed back to [`ProgressReporter::complete`], which consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Receives progress notifications from the migrators.
///
/// Implementations must be cheap to call: migrators report once per record
/// in the middle of their fetch and insert loop.
pub trait ProgressReporter: Send + Sync {
    /// Begins tracking a pass over `total` records and returns its handle.
    fn start(&self, name: &str, total: usize) -> TaskHandle;

    /// Records one migrated record for the given pass.
    fn increment(&self, task: &TaskHandle);

    /// Finishes the pass, consuming its handle.
    fn complete(&self, task: TaskHandle);
}

struct TaskState {
    name: String,
    total: usize,
    done: usize,
}

/// Reporter that writes progress to the tracing subscriber.
///
/// Pass boundaries are logged at info level, per record steps at debug.
#[derive(Default)]
pub struct LogProgress {
    next_handle: AtomicU64,
    tasks: Mutex<HashMap<TaskHandle, TaskState>>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn start(&self, name: &str, total: usize) -> TaskHandle {
        let task = TaskHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        self.tasks.lock().unwrap().insert(
            task,
            TaskState {
                name: name.to_string(),
                total,
                done: 0,
            },
        );
        info!(task = name, total, "migration pass started");
        task
    }

    fn increment(&self, task: &TaskHandle) {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(state) = tasks.get_mut(task) {
            state.done += 1;
            debug!(
                task = %state.name,
                done = state.done,
                total = state.total,
                "record migrated"
            );
        }
    }

    fn complete(&self, task: TaskHandle) {
        if let Some(state) = self.tasks.lock().unwrap().remove(&task) {
            info!(
                task = %state.name,
                done = state.done,
                total = state.total,
                "migration pass finished"
            );
        }
    }
}

/// One notification captured by [`RecordingProgress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { name: String, total: usize },
    Incremented { name: String },
    Completed { name: String },
}

/// Reporter that records every notification in order, for tests.
#[derive(Default)]
pub struct RecordingProgress {
    next_handle: AtomicU64,
    names: Mutex<HashMap<TaskHandle, String>>,
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications seen so far, in order.
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of the passes that were started, in order.
    pub fn started_passes(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Started { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of increments recorded for the named pass.
    pub fn increments_for(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| matches!(event, ProgressEvent::Incremented { name: n } if n == name))
            .count()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, name: &str, total: usize) -> TaskHandle {
        let task = TaskHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        self.names.lock().unwrap().insert(task, name.to_string());
        self.events.lock().unwrap().push(ProgressEvent::Started {
            name: name.to_string(),
            total,
        });
        task
    }

    fn increment(&self, task: &TaskHandle) {
        if let Some(name) = self.names.lock().unwrap().get(task) {
            self.events
                .lock()
                .unwrap()
                .push(ProgressEvent::Incremented { name: name.clone() });
        }
    }

    fn complete(&self, task: TaskHandle) {
        if let Some(name) = self.names.lock().unwrap().remove(&task) {
            self.events
                .lock()
                .unwrap()
                .push(ProgressEvent::Completed { name });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_progress_keeps_notification_order() {
        let progress = RecordingProgress::new();

        let task = progress.start("employees", 2);
        progress.increment(&task);
        progress.increment(&task);
        progress.complete(task);

        assert_eq!(
            progress.events(),
            vec![
                ProgressEvent::Started {
                    name: "employees".to_string(),
                    total: 2
                },
                ProgressEvent::Incremented {
                    name: "employees".to_string()
                },
                ProgressEvent::Incremented {
                    name: "employees".to_string()
                },
                ProgressEvent::Completed {
                    name: "employees".to_string()
                },
            ]
        );
        assert_eq!(progress.increments_for("employees"), 2);
    }

    #[test]
    fn test_recording_progress_tracks_concurrent_passes() {
        let progress = RecordingProgress::new();

        let employees = progress.start("employees", 1);
        let customers = progress.start("customers", 1);
        progress.increment(&customers);
        progress.increment(&employees);
        progress.complete(customers);
        progress.complete(employees);

        assert_eq!(
            progress.started_passes(),
            vec!["employees".to_string(), "customers".to_string()]
        );
        assert_eq!(progress.increments_for("employees"), 1);
        assert_eq!(progress.increments_for("customers"), 1);
    }

    #[test]
    fn test_increment_after_complete_is_dropped() {
        let progress = RecordingProgress::new();

        let task = progress.start("tips", 1);
        progress.complete(task);
        progress.increment(&task);

        assert_eq!(progress.increments_for("tips"), 0);
    }

    #[test]
    fn test_log_progress_issues_distinct_handles() {
        let progress = LogProgress::new();

        let first = progress.start("employees", 1);
        let second = progress.start("customers", 1);

        assert_ne!(first, second);
        progress.increment(&first);
        progress.complete(first);
        progress.complete(second);
    }
}
