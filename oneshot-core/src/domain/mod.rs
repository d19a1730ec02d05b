//! Core domain types
//!
//! These types describe one run: what gets launched (`LaunchSpec`), the handle
//! the cluster hands back (`TaskHandle`) and the outcomes produced while the
//! run progresses.

pub mod outcome;
pub mod task;
