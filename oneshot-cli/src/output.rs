//! Run output reporting
//!
//! Outputs are written as `name=value` lines to the file named by
//! `GITHUB_OUTPUT` when the binary runs inside a workflow, and printed to
//! stdout otherwise.

use anyhow::{Context, Result};
use colored::*;
use oneshot_core::domain::outcome::RunOutcome;
use oneshot_core::domain::task::TaskHandle;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Destination for run outputs
#[derive(Debug, Clone)]
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Uses `GITHUB_OUTPUT` when it is set
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os("GITHUB_OUTPUT")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        )
    }

    /// Sets a single output
    pub fn set(&self, name: &str, value: impl Display) -> Result<()> {
        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;
                writeln!(file, "{}={}", name, value)
                    .with_context(|| format!("Failed to write output '{}'", name))?;
            }
            None => println!("{}={}", name, value),
        }
        Ok(())
    }

    /// Reports the outputs of a finished run
    pub fn report_outcome(&self, outcome: &RunOutcome) -> Result<()> {
        self.set("success", outcome.success)?;
        self.set("exit_code", outcome.exit_code)?;
        self.set("task_arn", &outcome.task_arn)?;
        self.set("was_stopped", outcome.was_stopped)
    }

    /// Reports a failed run as a workflow error
    pub fn report_failure(&self, error: &anyhow::Error) -> Result<()> {
        println!("::error::{:#}", error);
        self.set("success", false)
    }
}

/// Command that shows what happened to a task
pub fn log_hint(cluster: &str, task: &TaskHandle) -> String {
    format!(
        "aws ecs describe-tasks --cluster {} --tasks {}",
        cluster, task
    )
}

/// Prints the human-readable summary of a run
pub fn print_summary(cluster: &str, outcome: &RunOutcome) {
    println!();
    if outcome.was_stopped {
        println!(
            "{}",
            format!("⚠ Task {} was stopped before finishing", outcome.task_arn).yellow()
        );
    } else if outcome.success {
        println!(
            "{}",
            format!("✓ Task {} succeeded", outcome.task_arn).green()
        );
    } else {
        println!(
            "{}",
            format!(
                "✗ Task {} failed with exit code {}",
                outcome.task_arn, outcome.exit_code
            )
            .red()
        );
    }
    print_hint(cluster, &outcome.task_arn);
}

pub fn print_hint(cluster: &str, task: &TaskHandle) {
    println!("{}", "  Inspect the task with:".dimmed());
    println!("{}", format!("    {}", log_hint(cluster, task)).dimmed());
}
