//! Oneshot job-control client
//!
//! The capability surface the runner needs from a remote cluster
//! orchestrator, plus its AWS ECS implementation.
//!
//! The runner only depends on the [`JobControlClient`] trait; [`EcsClient`]
//! maps it onto the ECS API.
//!
//! # Example
//!
//! ```no_run
//! use oneshot_client::{AwsCredentials, EcsClient, JobControlClient};
//!
//! #[tokio::main]
//! async fn main() -> oneshot_client::Result<()> {
//!     let client = EcsClient::from_credentials(&AwsCredentials::from_env()).await;
//!
//!     let revision = client.resolve_latest_template("my-task").await?;
//!     println!("Latest revision: {:?}", revision);
//!     Ok(())
//! }
//! ```

mod credentials;
mod ecs;
pub mod error;

pub use credentials::AwsCredentials;
pub use ecs::EcsClient;
pub use error::{ClientError, Result};

use async_trait::async_trait;
use oneshot_core::domain::task::TaskHandle;
use oneshot_core::dto::task::{LaunchRequest, StoppedTask, TaskQueryResponse};

/// Remote job-control operations used by the runner
///
/// Implementations only translate calls; they never retry and never interpret
/// task status. A response carrying `failures` is still `Ok`: deciding what a
/// failure means is up to the caller.
#[async_trait]
pub trait JobControlClient: Send + Sync {
    /// Resolves a task definition family to its most recent active revision
    ///
    /// # Returns
    /// The revision identifier, or `None` when the family has no revisions
    async fn resolve_latest_template(&self, family: &str) -> Result<Option<String>>;

    /// Launches the task described by `request`
    async fn launch_task(&self, request: &LaunchRequest) -> Result<TaskQueryResponse>;

    /// Fetches the current record of a single task
    async fn describe_task(&self, cluster: &str, task: &TaskHandle) -> Result<TaskQueryResponse>;

    /// Forcibly stops a task
    async fn stop_task(&self, cluster: &str, task: &TaskHandle, reason: &str)
    -> Result<StoppedTask>;
}
