//! Oneshot Runner
//!
//! Launches a single task on a remote cluster, waits for it to stop and
//! reports the exit code of one of its containers.
//!
//! Architecture:
//! - Configuration: validated run settings and the parsing of raw inputs
//! - Services: task launch and forced stop, one remote call each
//! - Scheduler: completion polling and the run lifecycle, including
//!   cancellation by termination signals
//!
//! All remote access goes through [`oneshot_client::JobControlClient`].

pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::RunConfig;
pub use error::RunError;
pub use scheduler::{TaskRunner, shutdown_signal};
