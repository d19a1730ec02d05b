//! Service layer
//!
//! Services wrap the one-shot remote operations of a run: launching the task
//! and forcibly stopping it. Each performs exactly one logical request and
//! never retries.

mod launcher;
mod stop;

pub use launcher::TaskLauncher;
pub use stop::{StopRequester, UNKNOWN_STATUS};
