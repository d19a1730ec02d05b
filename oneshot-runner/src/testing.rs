//! In-memory job-control client for tests

use async_trait::async_trait;
use oneshot_client::{ClientError, JobControlClient, Result};
use oneshot_core::domain::task::TaskHandle;
use oneshot_core::dto::task::{
    ContainerRecord, Failure, LaunchRequest, StoppedTask, TaskQueryResponse, TaskRecord,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const REVISION: &str = "arn:aws:ecs:eu-west-1:123456789012:task-definition/migrate:7";
pub const HANDLE: &str = "h1";

type DescribeScript = Box<dyn Fn(usize) -> Result<TaskQueryResponse> + Send + Sync>;

/// Number of calls made to each remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calls {
    pub resolve: usize,
    pub launch: usize,
    pub describe: usize,
    pub stop: usize,
}

/// Client whose responses are scripted per test
///
/// Describe responses come from a closure receiving the zero-based call index.
pub struct ScriptedClient {
    template: Option<String>,
    launch: TaskQueryResponse,
    describe: DescribeScript,
    stop: Option<StoppedTask>,
    resolve_calls: AtomicUsize,
    launch_calls: AtomicUsize,
    describe_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    launched: Mutex<Vec<LaunchRequest>>,
    stop_reasons: Mutex<Vec<String>>,
}

impl ScriptedClient {
    /// Template resolves, launch returns `HANDLE`, the task runs forever
    pub fn new() -> Self {
        Self {
            template: Some(REVISION.to_string()),
            launch: response("PENDING", vec![container("app", None)]),
            describe: Box::new(|_| Ok(response("RUNNING", vec![container("app", None)]))),
            stop: Some(StoppedTask {
                task_arn: Some(HANDLE.to_string()),
                last_status: Some("DEPROVISIONING".to_string()),
                stopped_at: None,
            }),
            resolve_calls: AtomicUsize::new(0),
            launch_calls: AtomicUsize::new(0),
            describe_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            launched: Mutex::new(Vec::new()),
            stop_reasons: Mutex::new(Vec::new()),
        }
    }

    pub fn without_template(mut self) -> Self {
        self.template = None;
        self
    }

    pub fn with_launch_response(mut self, response: TaskQueryResponse) -> Self {
        self.launch = response;
        self
    }

    pub fn with_describe(
        mut self,
        script: impl Fn(usize) -> Result<TaskQueryResponse> + Send + Sync + 'static,
    ) -> Self {
        self.describe = Box::new(script);
        self
    }

    pub fn with_stop_response(mut self, stopped: StoppedTask) -> Self {
        self.stop = Some(stopped);
        self
    }

    /// Makes every stop request fail
    pub fn with_failing_stop(mut self) -> Self {
        self.stop = None;
        self
    }

    pub fn calls(&self) -> Calls {
        Calls {
            resolve: self.resolve_calls.load(Ordering::SeqCst),
            launch: self.launch_calls.load(Ordering::SeqCst),
            describe: self.describe_calls.load(Ordering::SeqCst),
            stop: self.stop_calls.load(Ordering::SeqCst),
        }
    }

    pub fn launched(&self) -> Vec<LaunchRequest> {
        self.launched.lock().unwrap().clone()
    }

    pub fn stop_reasons(&self) -> Vec<String> {
        self.stop_reasons.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobControlClient for ScriptedClient {
    async fn resolve_latest_template(&self, _family: &str) -> Result<Option<String>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.template.clone())
    }

    async fn launch_task(&self, request: &LaunchRequest) -> Result<TaskQueryResponse> {
        self.launch_calls.fetch_add(1, Ordering::SeqCst);
        self.launched.lock().unwrap().push(request.clone());
        Ok(self.launch.clone())
    }

    async fn describe_task(&self, _cluster: &str, _task: &TaskHandle) -> Result<TaskQueryResponse> {
        let index = self.describe_calls.fetch_add(1, Ordering::SeqCst);
        (self.describe)(index)
    }

    async fn stop_task(
        &self,
        _cluster: &str,
        _task: &TaskHandle,
        reason: &str,
    ) -> Result<StoppedTask> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.stop_reasons.lock().unwrap().push(reason.to_string());
        self.stop
            .clone()
            .ok_or_else(|| ClientError::api("StopTask", "access denied"))
    }
}

pub fn container(name: &str, exit_code: Option<i32>) -> ContainerRecord {
    ContainerRecord {
        name: Some(name.to_string()),
        exit_code,
        ..Default::default()
    }
}

/// A single-task response with the given status
pub fn response(status: &str, containers: Vec<ContainerRecord>) -> TaskQueryResponse {
    TaskQueryResponse {
        failures: Vec::new(),
        tasks: vec![TaskRecord {
            task_arn: Some(HANDLE.to_string()),
            last_status: Some(status.to_string()),
            containers,
            ..Default::default()
        }],
    }
}

pub fn failed_response(reason: &str) -> TaskQueryResponse {
    TaskQueryResponse {
        failures: vec![Failure {
            reason: Some(reason.to_string()),
            ..Default::default()
        }],
        tasks: Vec::new(),
    }
}
