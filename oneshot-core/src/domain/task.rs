//! Task domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last status reported by the cluster once a task has fully stopped
pub const STOPPED_STATUS: &str = "STOPPED";

/// Identifier the job-control system assigns to a launched task
///
/// Opaque to us; in practice it is the task ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskHandle {
    fn from(arn: String) -> Self {
        Self(arn)
    }
}

impl From<&str> for TaskHandle {
    fn from(arn: &str) -> Self {
        Self(arn.to_string())
    }
}

/// Where the task's network interface is placed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPlacement {
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub assign_public_ip: bool,
}

/// Key/value tag attached to a launched task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTag {
    pub key: String,
    pub value: String,
}

impl TaskTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to launch a single task
///
/// Built once from configuration and never modified after the launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Cluster the task runs on
    pub cluster: String,
    /// Task definition family; the latest active revision is used
    pub task_definition: String,
    /// Container whose command is overridden and whose exit code is reported
    pub container: String,
    /// Command override, one element per argument
    pub command: Vec<String>,
    pub network: NetworkPlacement,
    /// Tags for the task; an empty list means "send none"
    pub tags: Vec<TaskTag>,
    /// Optional task group label
    pub group: Option<String>,
}

impl LaunchSpec {
    /// Creates a spec with no network placement, tags or group
    pub fn new(
        cluster: impl Into<String>,
        task_definition: impl Into<String>,
        container: impl Into<String>,
        command: Vec<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            task_definition: task_definition.into(),
            container: container.into(),
            command,
            network: NetworkPlacement::default(),
            tags: Vec::new(),
            group: None,
        }
    }

    pub fn with_network(mut self, network: NetworkPlacement) -> Self {
        self.network = network;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(TaskTag::new(key, value));
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
