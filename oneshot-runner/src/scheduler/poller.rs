//! Completion poller
//!
//! One status check of a launched task. The caller decides the cadence; a
//! check never retries on its own.

use oneshot_client::{JobControlClient, Result};
use oneshot_core::domain::outcome::{
    EXIT_CODE_CONTAINER_NOT_FOUND, EXIT_CODE_INDETERMINATE, EXIT_CODE_UNAVAILABLE, PollOutcome,
};
use oneshot_core::domain::task::TaskHandle;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Checks whether a task has stopped and extracts its exit code
pub struct CompletionPoller {
    client: Arc<dyn JobControlClient>,
}

impl CompletionPoller {
    pub fn new(client: Arc<dyn JobControlClient>) -> Self {
        Self { client }
    }

    /// Performs a single status check
    ///
    /// A describe response with failures or without any task is treated as
    /// terminal with [`EXIT_CODE_INDETERMINATE`] rather than retried. Errors
    /// from the remote call itself are returned to the caller.
    pub async fn check_once(
        &self,
        task: &TaskHandle,
        cluster: &str,
        container: &str,
    ) -> Result<PollOutcome> {
        debug!("Checking status on task {}", task);

        let response = self.client.describe_task(cluster, task).await?;

        if !response.failures.is_empty() {
            warn!("Describe task had failures: {:?}", response.failures);
            return Ok(PollOutcome::Terminated(EXIT_CODE_INDETERMINATE));
        }

        let Some(record) = response.tasks.first() else {
            warn!("Describe task had no tasks in response");
            return Ok(PollOutcome::Terminated(EXIT_CODE_INDETERMINATE));
        };

        let status = record.last_status.as_deref().unwrap_or("unknown");
        if !record.is_stopped() {
            info!("Task {} is still running. Last status is {}", task, status);
            return Ok(PollOutcome::Pending);
        }

        info!(
            "Task {} has stopped running. Stopped reason: {}",
            task,
            record.stopped_reason.as_deref().unwrap_or("none")
        );

        let Some(target) = record.container(container) else {
            warn!("Task {} has no container named {}", task, container);
            return Ok(PollOutcome::Terminated(EXIT_CODE_CONTAINER_NOT_FOUND));
        };

        match target.exit_code {
            Some(exit_code) => {
                info!("Task {} exit code of {} is {}", task, container, exit_code);
                Ok(PollOutcome::Terminated(exit_code))
            }
            None => {
                warn!(
                    "Container {} of task {} has no exit code ({})",
                    container,
                    task,
                    target.reason.as_deref().unwrap_or("never started")
                );
                Ok(PollOutcome::Terminated(EXIT_CODE_UNAVAILABLE))
            }
        }
    }
}
