//! Error types for a run

use oneshot_client::ClientError;
use oneshot_core::domain::task::TaskHandle;
use thiserror::Error;

/// Reasons a run can fail
///
/// Launch-time variants leave nothing running on the cluster. `Check` is
/// raised after the task was launched; the task is left running.
#[derive(Debug, Error)]
pub enum RunError {
    /// The task definition family has no active revision
    #[error("No task definition revision found for '{0}'")]
    TemplateNotFound(String),

    /// The cluster refused to launch the task
    #[error("Task launch rejected: {0}")]
    LaunchRejected(String),

    /// The launch call succeeded but returned no task
    #[error("No tasks started")]
    NoTaskReturned,

    /// The launched task record has no identifier
    #[error("Task does not have an ARN")]
    MissingHandle,

    /// A remote call made while launching failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A status check failed; polling stopped
    #[error("Status check for task {task_arn} failed")]
    Check {
        task_arn: TaskHandle,
        #[source]
        source: ClientError,
    },
}

impl RunError {
    /// Handle of the task left behind by the failure, if one was launched
    pub fn task_arn(&self) -> Option<&TaskHandle> {
        match self {
            Self::Check { task_arn, .. } => Some(task_arn),
            _ => None,
        }
    }
}
