//! Run configuration
//!
//! Holds the validated settings of one run and the helpers that turn raw,
//! delimiter-separated inputs into lists and tags.

use oneshot_core::domain::task::{LaunchSpec, NetworkPlacement, TaskTag};
use std::time::Duration;

/// Default delay between two status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Cluster to launch on
    pub cluster: String,

    /// Task definition family
    pub task_definition: String,

    /// Container whose command is overridden and whose exit code is reported
    pub container: String,

    /// Command override tokens
    pub command: Vec<String>,

    pub subnets: Vec<String>,

    pub security_groups: Vec<String>,

    pub assign_public_ip: bool,

    /// Tags attached to the task
    pub tags: Vec<TaskTag>,

    /// Task group label
    pub group: Option<String>,

    /// How often to check the task status
    pub poll_interval: Duration,
}

impl RunConfig {
    /// Creates a configuration with defaults for everything but the target
    pub fn new(cluster: String, task_definition: String, container: String) -> Self {
        Self {
            cluster,
            task_definition,
            container,
            command: Vec::new(),
            subnets: Vec::new(),
            security_groups: Vec::new(),
            assign_public_ip: false,
            tags: Vec::new(),
            group: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Adds a tag
    pub fn with_tag(mut self, key: String, value: String) -> Self {
        self.tags.push(TaskTag::new(key, value));
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cluster.is_empty() {
            anyhow::bail!("cluster cannot be empty");
        }

        if self.task_definition.is_empty() {
            anyhow::bail!("task_definition cannot be empty");
        }

        if self.container.is_empty() {
            anyhow::bail!("container cannot be empty");
        }

        if self.command.is_empty() {
            anyhow::bail!("command cannot be empty");
        }

        if self.subnets.is_empty() {
            anyhow::bail!("at least one subnet is required");
        }

        if self.tags.iter().any(|t| t.key.is_empty()) {
            anyhow::bail!("tag keys cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }

    /// Builds the launch spec for this configuration
    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            cluster: self.cluster.clone(),
            task_definition: self.task_definition.clone(),
            container: self.container.clone(),
            command: self.command.clone(),
            network: NetworkPlacement {
                subnets: self.subnets.clone(),
                security_groups: self.security_groups.clone(),
                assign_public_ip: self.assign_public_ip,
            },
            tags: self.tags.clone(),
            group: self.group.clone().filter(|g| !g.is_empty()),
        }
    }
}

/// Splits a delimited input into trimmed, non-empty tokens
///
/// An empty delimiter keeps the whole (trimmed) input as a single token.
pub fn split_list(raw: &str, delimiter: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if delimiter.is_empty() {
        return vec![raw.to_string()];
    }

    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `key:value` pairs joined by `delimiter`
///
/// The value may itself contain `:`; only the first one separates key and value.
pub fn parse_tags(raw: &str, delimiter: &str) -> anyhow::Result<Vec<TaskTag>> {
    split_list(raw, delimiter)
        .into_iter()
        .map(|pair| match pair.split_once(':') {
            Some((key, value)) => Ok(TaskTag::new(key.trim(), value.trim())),
            None => anyhow::bail!("tag '{}' is not in key:value form", pair),
        })
        .collect()
}
