//! AWS ECS implementation of the job-control client
//!
//! Tasks always run with the Fargate launch type inside the caller's VPC
//! (awsvpc network mode).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::Client;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::primitives::DateTime;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, Container, ContainerOverride, Failure as EcsFailure,
    LaunchType, NetworkConfiguration, SortOrder, Tag, Task, TaskDefinitionStatus, TaskOverride,
};
use oneshot_core::domain::task::TaskHandle;
use oneshot_core::dto::task::{
    ContainerRecord, Failure, LaunchRequest, StoppedTask, TaskQueryResponse, TaskRecord,
};
use tracing::{debug, info};

use crate::credentials::AwsCredentials;
use crate::error::{ClientError, Result};
use crate::JobControlClient;

/// Job-control client backed by the ECS API
#[derive(Debug, Clone)]
pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    /// Wraps an already configured SDK client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from environment-supplied credentials
    ///
    /// Empty credentials or region fall back to the SDK's default provider chain.
    pub async fn from_credentials(credentials: &AwsCredentials) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if !credentials.region.is_empty() {
            loader = loader.region(Region::new(credentials.region.clone()));
        }
        if let Some(static_credentials) = credentials.to_sdk_credentials() {
            loader = loader.credentials_provider(static_credentials);
        }

        let config = loader.load().await;
        info!(
            "ECS client initialized (region: {})",
            config
                .region()
                .map(|r| r.as_ref().to_string())
                .unwrap_or_else(|| "<unset>".to_string())
        );

        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl JobControlClient for EcsClient {
    async fn resolve_latest_template(&self, family: &str) -> Result<Option<String>> {
        let mut next_token: Option<String> = None;

        // Prefix listing also returns families that merely start with `family`,
        // so keep paging until the exact family shows up.
        loop {
            let output = self
                .client
                .list_task_definitions()
                .family_prefix(family)
                .status(TaskDefinitionStatus::Active)
                .sort(SortOrder::Desc)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error("ListTaskDefinitions", e))?;

            if let Some(arn) = output
                .task_definition_arns()
                .iter()
                .find(|arn| family_of(arn) == Some(family))
            {
                debug!("Resolved task definition {} to {}", family, arn);
                return Ok(Some(arn.clone()));
            }

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => return Ok(None),
            }
        }
    }

    async fn launch_task(&self, request: &LaunchRequest) -> Result<TaskQueryResponse> {
        let network = &request.network;
        let vpc = AwsVpcConfiguration::builder()
            .set_subnets(Some(network.subnets.clone()))
            .set_security_groups(
                (!network.security_groups.is_empty()).then(|| network.security_groups.clone()),
            )
            .assign_public_ip(if network.assign_public_ip {
                AssignPublicIp::Enabled
            } else {
                AssignPublicIp::Disabled
            })
            .build()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let overrides = TaskOverride::builder()
            .container_overrides(
                ContainerOverride::builder()
                    .name(&request.container_override.name)
                    .set_command(Some(request.container_override.command.clone()))
                    .build(),
            )
            .build();

        let tags = request.tags.as_ref().map(|tags| {
            tags.iter()
                .map(|t| Tag::builder().key(&t.key).value(&t.value).build())
                .collect::<Vec<_>>()
        });

        debug!(
            "RunTask on cluster {} with {}",
            request.cluster, request.task_definition
        );

        let output = self
            .client
            .run_task()
            .cluster(&request.cluster)
            .task_definition(&request.task_definition)
            .count(request.count)
            .launch_type(LaunchType::Fargate)
            .network_configuration(NetworkConfiguration::builder().awsvpc_configuration(vpc).build())
            .overrides(overrides)
            .set_tags(tags)
            .set_group(request.group.clone())
            .send()
            .await
            .map_err(|e| api_error("RunTask", e))?;

        Ok(TaskQueryResponse {
            failures: output.failures().iter().map(failure_from).collect(),
            tasks: output.tasks().iter().map(task_record_from).collect(),
        })
    }

    async fn describe_task(&self, cluster: &str, task: &TaskHandle) -> Result<TaskQueryResponse> {
        let output = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .tasks(task.as_str())
            .send()
            .await
            .map_err(|e| api_error("DescribeTasks", e))?;

        Ok(TaskQueryResponse {
            failures: output.failures().iter().map(failure_from).collect(),
            tasks: output.tasks().iter().map(task_record_from).collect(),
        })
    }

    async fn stop_task(
        &self,
        cluster: &str,
        task: &TaskHandle,
        reason: &str,
    ) -> Result<StoppedTask> {
        let output = self
            .client
            .stop_task()
            .cluster(cluster)
            .task(task.as_str())
            .reason(reason)
            .send()
            .await
            .map_err(|e| api_error("StopTask", e))?;

        Ok(output
            .task()
            .map(|t| StoppedTask {
                task_arn: t.task_arn().map(str::to_string),
                last_status: t.last_status().map(str::to_string),
                stopped_at: t.stopped_at().and_then(to_utc),
            })
            .unwrap_or_default())
    }
}

fn api_error<E: std::error::Error>(operation: &'static str, err: E) -> ClientError {
    ClientError::api(operation, DisplayErrorContext(err).to_string())
}

/// Extracts the family from a task definition ARN (`...:task-definition/family:revision`)
fn family_of(arn: &str) -> Option<&str> {
    arn.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once(':'))
        .map(|(family, _revision)| family)
}

fn to_utc(ts: &DateTime) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

fn failure_from(failure: &EcsFailure) -> Failure {
    Failure {
        arn: failure.arn().map(str::to_string),
        reason: failure.reason().map(str::to_string),
        detail: failure.detail().map(str::to_string),
    }
}

fn container_record_from(container: &Container) -> ContainerRecord {
    ContainerRecord {
        name: container.name().map(str::to_string),
        last_status: container.last_status().map(str::to_string),
        exit_code: container.exit_code(),
        reason: container.reason().map(str::to_string),
    }
}

fn task_record_from(task: &Task) -> TaskRecord {
    TaskRecord {
        task_arn: task.task_arn().map(str::to_string),
        last_status: task.last_status().map(str::to_string),
        stopped_reason: task.stopped_reason().map(str::to_string),
        stopped_at: task.stopped_at().and_then(to_utc),
        containers: task.containers().iter().map(container_record_from).collect(),
    }
}
