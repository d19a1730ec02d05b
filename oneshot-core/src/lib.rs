//! Oneshot Core
//!
//! Core types shared by every oneshot crate.
//!
//! This crate contains:
//! - Domain types: the task being launched and the outcomes of a run
//! - DTOs: records exchanged with the job-control client

pub mod domain;
pub mod dto;
