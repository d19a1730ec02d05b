//! Oneshot CLI
//!
//! Runs a single ECS task, waits for it to stop and exits with success only
//! when the watched container exited with code 0. Meant to be called from a
//! CI pipeline; SIGINT/SIGTERM stop the task before exiting.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use oneshot_client::{AwsCredentials, EcsClient, JobControlClient};
use oneshot_runner::TaskRunner;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::RunArgs;
use output::OutputSink;

#[derive(Parser)]
#[command(name = "oneshot")]
#[command(about = "Run a one-off ECS task and wait for it to finish", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oneshot=info,oneshot_runner=info,oneshot_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let outputs = OutputSink::from_env();

    match execute(cli, &outputs).await {
        Ok(code) => Ok(code),
        Err(e) => {
            error!("Run failed: {:#}", e);
            outputs.report_failure(&e)?;
            Err(e)
        }
    }
}

async fn execute(cli: Cli, outputs: &OutputSink) -> Result<ExitCode> {
    let config = cli.run.into_run_config()?;

    let credentials = AwsCredentials::from_env();
    info!(
        "AWS Credentials.accessKeyId = {}",
        credentials.masked_access_key_id()
    );
    info!("AWS Region = {}", credentials.region);

    info!("ecsCluster = {}", config.cluster);
    info!("ecsTaskDefinition = {}", config.task_definition);
    info!("securityGroupIds = {:?}", config.security_groups);
    info!("subnets = {:?}", config.subnets);
    info!("container = {}", config.container);
    info!("command = {:?}", config.command);

    let client: Arc<dyn JobControlClient> =
        Arc::new(EcsClient::from_credentials(&credentials).await);
    let runner = TaskRunner::new(client, config.poll_interval);
    let spec = config.launch_spec();

    let outcome = match runner.run(&spec).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(task) = e.task_arn() {
                output::print_hint(&config.cluster, task);
            }
            return Err(e)
                .with_context(|| format!("Failed to run task from {}", config.task_definition));
        }
    };

    outputs
        .report_outcome(&outcome)
        .context("Failed to report run outputs")?;
    output::print_summary(&config.cluster, &outcome);

    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
