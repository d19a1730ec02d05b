//! Task DTOs exchanged with the job-control client

use serde::{Deserialize, Serialize};

use crate::domain::task::{NetworkPlacement, STOPPED_STATUS, TaskTag};

/// Command override for one container of the task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOverride {
    pub name: String,
    pub command: Vec<String>,
}

/// Request to launch exactly one task from a resolved task definition revision
///
/// `tags` and `group` are `None` when nothing should be sent; the remote API
/// treats an absent field differently from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub cluster: String,
    /// Fully resolved task definition revision (ARN or `family:revision`)
    pub task_definition: String,
    pub count: i32,
    pub network: NetworkPlacement,
    pub container_override: ContainerOverride,
    pub tags: Option<Vec<TaskTag>>,
    pub group: Option<String>,
}

/// A failure entry reported by the remote API for a launch or describe call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl Failure {
    /// Human readable reason, falling back to the detail field
    pub fn reason_text(&self) -> String {
        self.reason
            .as_deref()
            .or(self.detail.as_deref())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// Status of one container inside a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: Option<String>,
    pub last_status: Option<String>,
    /// Absent when the container never ran to completion
    pub exit_code: Option<i32>,
    pub reason: Option<String>,
}

/// Status of one task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_arn: Option<String>,
    pub last_status: Option<String>,
    pub stopped_reason: Option<String>,
    pub stopped_at: Option<chrono::DateTime<chrono::Utc>>,
    pub containers: Vec<ContainerRecord>,
}

impl TaskRecord {
    /// Whether the task reached its terminal status
    pub fn is_stopped(&self) -> bool {
        self.last_status.as_deref() == Some(STOPPED_STATUS)
    }

    /// Finds the container record with the given name
    pub fn container(&self, name: &str) -> Option<&ContainerRecord> {
        self.containers
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }
}

/// Response shape shared by the launch and describe calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueryResponse {
    pub failures: Vec<Failure>,
    pub tasks: Vec<TaskRecord>,
}

/// Response to a forced-stop request; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoppedTask {
    pub task_arn: Option<String>,
    pub last_status: Option<String>,
    pub stopped_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(name: &str, exit_code: Option<i32>) -> ContainerRecord {
        ContainerRecord {
            name: Some(name.to_string()),
            exit_code,
            ..Default::default()
        }
    }

    #[test]
    fn test_failure_reason_text_fallbacks() {
        let with_reason = Failure {
            reason: Some("RESOURCE:MEMORY".to_string()),
            detail: Some("detail".to_string()),
            ..Default::default()
        };
        assert_eq!(with_reason.reason_text(), "RESOURCE:MEMORY");

        let with_detail = Failure {
            detail: Some("detail".to_string()),
            ..Default::default()
        };
        assert_eq!(with_detail.reason_text(), "detail");

        assert_eq!(Failure::default().reason_text(), "unknown");
    }

    #[test]
    fn test_task_record_container_lookup() {
        let record = TaskRecord {
            last_status: Some("STOPPED".to_string()),
            containers: vec![container("app", Some(3)), container("sidecar", Some(0))],
            ..Default::default()
        };

        assert!(record.is_stopped());
        assert_eq!(record.container("app").and_then(|c| c.exit_code), Some(3));
        assert!(record.container("missing").is_none());
    }

    #[test]
    fn test_running_task_is_not_stopped() {
        let record = TaskRecord {
            last_status: Some("RUNNING".to_string()),
            ..Default::default()
        };
        assert!(!record.is_stopped());
        assert!(!TaskRecord::default().is_stopped());
    }
}
