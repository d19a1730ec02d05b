//! Stop requester

use oneshot_client::{JobControlClient, Result};
use oneshot_core::domain::outcome::StopOutcome;
use oneshot_core::domain::task::TaskHandle;
use std::sync::Arc;
use tracing::info;

/// Status reported when the stop response carries none
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Sends a forced-stop request for an in-flight task
///
/// Fire and report: the request is sent once and the task is not watched
/// afterwards.
pub struct StopRequester {
    client: Arc<dyn JobControlClient>,
}

impl StopRequester {
    pub fn new(client: Arc<dyn JobControlClient>) -> Self {
        Self { client }
    }

    pub async fn stop(&self, task: &TaskHandle, cluster: &str, reason: &str) -> Result<StopOutcome> {
        info!("Stopping task {}: {}", task, reason);

        let stopped = self.client.stop_task(cluster, task, reason).await?;

        Ok(StopOutcome {
            task_arn: stopped
                .task_arn
                .map(TaskHandle::from)
                .unwrap_or_else(|| task.clone()),
            last_status: stopped
                .last_status
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            stopped_at: stopped.stopped_at,
        })
    }
}
