//! Outcomes produced while a run progresses

use serde::{Deserialize, Serialize};

use crate::domain::task::TaskHandle;

/// Exit code reported when the status query returned failures or no task
pub const EXIT_CODE_INDETERMINATE: i32 = -1;

/// Exit code reported when the stopped task has no container with the requested name
pub const EXIT_CODE_CONTAINER_NOT_FOUND: i32 = -2;

/// Exit code reported when the container exists but never produced an exit code,
/// e.g. the task failed before the container started
pub const EXIT_CODE_UNAVAILABLE: i32 = -3;

/// Exit code reported when the run was cancelled by a termination signal
pub const EXIT_CODE_CANCELLED: i32 = 127;

/// Result of a single status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Task has not reached its terminal status yet
    Pending,
    /// Task is done; carries the container exit code or one of the sentinels
    Terminated(i32),
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub task_arn: TaskHandle,
    /// True when the run ended because of a termination signal
    pub was_stopped: bool,
}

impl RunOutcome {
    /// Outcome of a task that reached its terminal status on its own
    pub fn completed(task_arn: TaskHandle, exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
            task_arn,
            was_stopped: false,
        }
    }

    /// Outcome of a run cut short by a termination signal
    pub fn cancelled(task_arn: TaskHandle) -> Self {
        Self {
            success: false,
            exit_code: EXIT_CODE_CANCELLED,
            task_arn,
            was_stopped: true,
        }
    }
}

/// What the cluster reported after a forced stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopOutcome {
    pub task_arn: TaskHandle,
    pub last_status: String,
    pub stopped_at: Option<chrono::DateTime<chrono::Utc>>,
}
