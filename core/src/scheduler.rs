//! Admission control for traversal tasks.
//!
//! Tasks are submitted in target order. A task only starts once it holds one
//! of `max_concurrency` permits, so at most that many sessions are ever open
//! at once; the submitting loop waits on the permit rather than polling.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sharecrawl_common::network::target::Target;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::error;

use crate::task::HostOutcome;
use crate::walker::WalkStats;

/// Called with `(finished, total)` each time a task reaches a terminal state.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Totals across every host of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub hosts_attempted: usize,
    pub hosts_connected: usize,
    pub hosts_failed: usize,
    pub walk: WalkStats,
    pub elapsed: Duration,
}

impl ScanSummary {
    fn record(&mut self, joined: Result<HostOutcome, JoinError>) {
        self.hosts_attempted += 1;
        match joined {
            Ok(HostOutcome::Completed(stats)) => {
                self.hosts_connected += 1;
                self.walk += stats;
            }
            Ok(HostOutcome::Unreachable(_)) => self.hosts_failed += 1,
            Err(e) => {
                error!("Task ended abnormally: {e}");
                self.hosts_failed += 1;
            }
        }
    }
}

pub struct Scheduler {
    max_concurrency: usize,
    on_progress: Option<ProgressCallback>,
}

impl Scheduler {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Folds one ended task into the summary and reports progress. Panicked
    /// tasks count as finished too.
    fn settle(&self, summary: &mut ScanSummary, joined: Result<HostOutcome, JoinError>, total: usize) {
        summary.record(joined);
        if let Some(callback) = &self.on_progress {
            callback(summary.hosts_attempted, total);
        }
    }

    /// Runs one task per target and returns once every task has ended.
    pub async fn run<F, Fut>(&self, targets: Vec<Target>, mut task_factory: F) -> ScanSummary
    where
        F: FnMut(Target) -> Fut,
        Fut: Future<Output = HostOutcome> + Send + 'static,
    {
        let start: Instant = Instant::now();
        let total: usize = targets.len();
        let gate = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks: JoinSet<HostOutcome> = JoinSet::new();
        let mut summary = ScanSummary::default();

        for target in targets {
            // The gate is never closed, so acquiring cannot fail.
            let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
                break;
            };

            while let Some(joined) = tasks.try_join_next() {
                self.settle(&mut summary, joined, total);
            }

            let task = task_factory(target);
            tasks.spawn(async move {
                let _permit = permit;
                task.await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            self.settle(&mut summary, joined, total);
        }

        summary.elapsed = start.elapsed();
        summary
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
