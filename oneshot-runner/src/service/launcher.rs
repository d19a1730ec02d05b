//! Task launcher
//!
//! Resolves the latest revision of a task definition family and launches
//! exactly one task from it with the configured command override.

use oneshot_client::JobControlClient;
use oneshot_core::domain::task::{LaunchSpec, TaskHandle};
use oneshot_core::dto::task::{ContainerOverride, LaunchRequest};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::RunError;

/// Launches the single task of a run
pub struct TaskLauncher {
    client: Arc<dyn JobControlClient>,
}

impl TaskLauncher {
    pub fn new(client: Arc<dyn JobControlClient>) -> Self {
        Self { client }
    }

    /// Launches one task and returns its handle
    ///
    /// Nothing is left running on the cluster when this fails.
    pub async fn launch(&self, spec: &LaunchSpec) -> Result<TaskHandle, RunError> {
        let revision = self
            .client
            .resolve_latest_template(&spec.task_definition)
            .await?
            .ok_or_else(|| RunError::TemplateNotFound(spec.task_definition.clone()))?;

        info!("Using task definition {}", revision);

        let request = build_request(spec, revision);
        let response = self.client.launch_task(&request).await?;

        if let Some(first) = response.failures.first() {
            error!("Failed to start task: {:?}", response.failures);
            return Err(RunError::LaunchRejected(first.reason_text()));
        }

        let task = response.tasks.first().ok_or_else(|| {
            error!("No tasks started");
            RunError::NoTaskReturned
        })?;

        let arn = task
            .task_arn
            .clone()
            .filter(|arn| !arn.is_empty())
            .ok_or_else(|| {
                error!("Task does not have an ARN");
                RunError::MissingHandle
            })?;

        info!(
            "Started task {} (last status: {})",
            arn,
            task.last_status.as_deref().unwrap_or("unknown")
        );

        Ok(TaskHandle::from(arn))
    }
}

fn build_request(spec: &LaunchSpec, revision: String) -> LaunchRequest {
    LaunchRequest {
        cluster: spec.cluster.clone(),
        task_definition: revision,
        count: 1,
        network: spec.network.clone(),
        container_override: ContainerOverride {
            name: spec.container.clone(),
            command: spec.command.clone(),
        },
        tags: (!spec.tags.is_empty()).then(|| spec.tags.clone()),
        group: spec.group.clone().filter(|g| !g.is_empty()),
    }
}
