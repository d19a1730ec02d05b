//! Configuration module
//!
//! Run inputs as they arrive from the command line or from the `INPUT_*`
//! environment variables a CI action exposes, and their conversion into a
//! validated [`RunConfig`].

use anyhow::{Context, Result};
use clap::Args;
use oneshot_runner::RunConfig;
use oneshot_runner::config::{parse_tags, split_list};
use std::time::Duration;

/// Raw run inputs
#[derive(Args, Debug)]
pub struct RunArgs {
    /// ECS cluster to run the task on
    #[arg(long, env = "INPUT_ECS_CLUSTER")]
    pub ecs_cluster: String,

    /// Task definition family; its latest active revision is launched
    #[arg(long, env = "INPUT_ECS_TASK_DEFINITION")]
    pub ecs_task_definition: String,

    /// Container to override and report the exit code of
    #[arg(long, env = "INPUT_CONTAINER")]
    pub container: String,

    /// Subnet ids, comma separated
    #[arg(long, env = "INPUT_SUBNETS")]
    pub subnets: String,

    /// Security group ids, comma separated
    #[arg(long, env = "INPUT_SECURITY_GROUP_IDS", default_value = "")]
    pub security_group_ids: String,

    /// Give the task a public IP address
    #[arg(long, env = "INPUT_ASSIGN_PUBLIC_IP")]
    pub assign_public_ip: bool,

    /// Command override, split on --command-delimiter
    #[arg(long, env = "INPUT_COMMAND")]
    pub command: String,

    #[arg(long, env = "INPUT_COMMAND_DELIMITER", default_value = ",")]
    pub command_delimiter: String,

    /// Tags as key:value pairs, split on --tag-delimiter
    #[arg(long, env = "INPUT_TAGS", default_value = "")]
    pub tags: String,

    #[arg(long, env = "INPUT_TAG_DELIMITER", default_value = ",")]
    pub tag_delimiter: String,

    /// Task group label
    #[arg(long, env = "INPUT_GROUP")]
    pub group: Option<String>,

    /// Milliseconds between two status checks
    #[arg(long, env = "INPUT_CHECK_INTERVAL_MS", default_value_t = 5000)]
    pub check_interval_ms: u64,
}

impl RunArgs {
    /// Converts the raw inputs into a validated run configuration
    pub fn into_run_config(self) -> Result<RunConfig> {
        let mut config = RunConfig::new(
            self.ecs_cluster.trim().to_string(),
            self.ecs_task_definition.trim().to_string(),
            self.container.trim().to_string(),
        );

        config.command = split_list(&self.command, &self.command_delimiter);
        config.subnets = split_list(&self.subnets, ",");
        config.security_groups = split_list(&self.security_group_ids, ",");
        config.assign_public_ip = self.assign_public_ip;
        config.tags = parse_tags(&self.tags, &self.tag_delimiter).context("Invalid tags")?;
        config.group = self
            .group
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        config.poll_interval = Duration::from_millis(self.check_interval_ms);

        config.validate().context("Invalid run configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use oneshot_core::domain::task::TaskTag;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(extra: &[&str]) -> Result<RunConfig> {
        parse_with_command("bash,-c,echo hi", extra)
    }

    fn parse_with_command(command: &str, extra: &[&str]) -> Result<RunConfig> {
        let mut args = vec![
            "oneshot",
            "--ecs-cluster",
            "ci",
            "--ecs-task-definition",
            "migrate",
            "--container",
            "app",
            "--subnets",
            "subnet-1, subnet-2",
            "--command",
            command,
        ];
        args.extend_from_slice(extra);
        TestCli::try_parse_from(args)?.run.into_run_config()
    }

    #[test]
    fn test_minimal_inputs() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.cluster, "ci");
        assert_eq!(config.subnets, vec!["subnet-1", "subnet-2"]);
        assert_eq!(config.command, vec!["bash", "-c", "echo hi"]);
        assert!(config.security_groups.is_empty());
        assert!(config.tags.is_empty());
        assert!(config.group.is_none());
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_optional_inputs() {
        let config = parse(&[
            "--security-group-ids",
            "sg-1",
            "--tags",
            "team:ci;run:42",
            "--tag-delimiter",
            ";",
            "--group",
            "nightly",
            "--check-interval-ms",
            "250",
            "--assign-public-ip",
        ])
        .unwrap();

        assert_eq!(config.security_groups, vec!["sg-1"]);
        assert_eq!(
            config.tags,
            vec![TaskTag::new("team", "ci"), TaskTag::new("run", "42")]
        );
        assert_eq!(config.group.as_deref(), Some("nightly"));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(config.assign_public_ip);
    }

    #[test]
    fn test_custom_command_delimiter() {
        let config = parse_with_command("npm run migrate", &["--command-delimiter", " "]).unwrap();
        assert_eq!(config.command, vec!["npm", "run", "migrate"]);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(parse(&["--tags", "no-colon"]).is_err());
        assert!(parse(&["--check-interval-ms", "0"]).is_err());
        assert!(parse_with_command(" , ", &[]).is_err());
    }
}
