//! Run lifecycle
//!
//! A run moves through `Launching -> Polling -> Terminated`, or
//! `Polling -> Stopping -> Terminated` when a termination signal arrives
//! while the task is being watched.
//!
//! Polling is a fixed-interval timer. Each check is awaited before the next
//! tick is considered, so checks never overlap and a stop never runs next to
//! a check. A pending termination signal always wins over the next tick.

use oneshot_client::JobControlClient;
use oneshot_core::domain::outcome::{PollOutcome, RunOutcome};
use oneshot_core::domain::task::{LaunchSpec, TaskHandle};
use std::future::Future;
use std::sync::Arc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

use crate::error::RunError;
use crate::scheduler::poller::CompletionPoller;
use crate::scheduler::signal::shutdown_signal;
use crate::service::{StopRequester, TaskLauncher};

/// Reason sent with the forced stop of a cancelled run
pub const STOP_REASON: &str = "Run cancelled by termination signal";

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Launching,
    Polling,
    Stopping,
    Terminated,
}

impl RunState {
    fn advance(self, next: RunState) -> RunState {
        debug!("Run state {:?} -> {:?}", self, next);
        next
    }
}

/// Launches one task and waits for it to stop
pub struct TaskRunner {
    launcher: TaskLauncher,
    poller: CompletionPoller,
    stopper: StopRequester,
    poll_interval: Duration,
}

impl TaskRunner {
    /// Creates a runner checking the task status every `poll_interval`
    pub fn new(client: Arc<dyn JobControlClient>, poll_interval: Duration) -> Self {
        Self {
            launcher: TaskLauncher::new(Arc::clone(&client)),
            poller: CompletionPoller::new(Arc::clone(&client)),
            stopper: StopRequester::new(client),
            poll_interval,
        }
    }

    /// Runs the task, cancelling it on SIGINT or SIGTERM
    ///
    /// There is no overall timeout: the run waits until the task stops or a
    /// signal arrives.
    pub async fn run(&self, spec: &LaunchSpec) -> Result<RunOutcome, RunError> {
        self.run_until(spec, shutdown_signal()).await
    }

    /// Runs the task, cancelling it when `shutdown` resolves
    ///
    /// `shutdown` is first polled once the task is launched and is dropped
    /// when the run ends; only its first completion has any effect.
    pub async fn run_until<F>(&self, spec: &LaunchSpec, shutdown: F) -> Result<RunOutcome, RunError>
    where
        F: Future<Output = ()>,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, cluster = %spec.cluster);

        self.drive(spec, shutdown).instrument(span).await
    }

    async fn drive<F>(&self, spec: &LaunchSpec, shutdown: F) -> Result<RunOutcome, RunError>
    where
        F: Future<Output = ()>,
    {
        let mut state = RunState::Launching;
        info!(
            "Launching task from {} on cluster {}",
            spec.task_definition, spec.cluster
        );

        let task = self.launcher.launch(spec).await?;
        state = state.advance(RunState::Polling);

        let mut shutdown = std::pin::pin!(shutdown);
        let mut ticker = time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Waiting for task {} (check interval: {:?})",
            task, self.poll_interval
        );

        let outcome = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    state = state.advance(RunState::Stopping);
                    self.stop(&task, &spec.cluster).await;
                    break RunOutcome::cancelled(task.clone());
                }
                _ = ticker.tick() => {
                    let poll = self
                        .poller
                        .check_once(&task, &spec.cluster, &spec.container)
                        .await
                        .map_err(|source| {
                            error!("Status check for task {} failed: {}", task, source);
                            RunError::Check {
                                task_arn: task.clone(),
                                source,
                            }
                        })?;

                    if let PollOutcome::Terminated(exit_code) = poll {
                        info!("Task exited with result {}", exit_code);
                        break RunOutcome::completed(task.clone(), exit_code);
                    }
                }
            }
        };

        state.advance(RunState::Terminated);
        Ok(outcome)
    }

    /// Sends the single stop request of a cancelled run; failures are only logged
    async fn stop(&self, task: &TaskHandle, cluster: &str) {
        match self.stopper.stop(task, cluster, STOP_REASON).await {
            Ok(stopped) => info!(
                "Stop requested for task {}: last status {}, stopped at {}",
                stopped.task_arn,
                stopped.last_status,
                stopped
                    .stopped_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default()
            ),
            Err(e) => error!("Failed to stop task {}: {}", task, e),
        }
    }
}
