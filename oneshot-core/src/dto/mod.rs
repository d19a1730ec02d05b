//! Data Transfer Objects for the job-control client
//!
//! Lightweight, transport-agnostic views of the requests and responses
//! exchanged with the remote job-control API. The client crate maps its wire
//! format onto these; the runner only ever sees these shapes.

pub mod task;
