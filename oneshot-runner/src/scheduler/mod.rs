//! Scheduler layer for the runner
//!
//! Drives a launched task to completion: periodic status checks, the run
//! lifecycle state machine, and cancellation on termination signals.

pub mod orchestrator;
pub mod poller;
mod signal;

pub use orchestrator::{RunState, STOP_REASON, TaskRunner};
pub use poller::CompletionPoller;
pub use signal::shutdown_signal;
