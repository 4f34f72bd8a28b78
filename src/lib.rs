//! Texas county demographics library
//!
//! Exposes the county cache, Census request plumbing and fetch orchestration
//! used by the `txcounty` binary and by integration tests.

pub mod cache;
pub mod cleanup;
pub mod cli;
pub mod data;
pub mod fetch;
pub mod request;
