#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This is an implementation detail of the repo-pulse tool. Do not take a dependency on this crate
//! as it may change in incompatible ways without warning.

// Core library for repo-pulse
//
// This library holds the repository analytics pipeline behind the repo-pulse tool: it
// fetches a repository and its activity from the GitHub API, tolerates partial failures,
// and derives a small set of health metrics from what came back.
//
// # Module Organization
//
// - [`commands`]: Command-line interface and orchestration of a single invocation
// - [`facts`]: Remote entity fetching, response classification and fetch orchestration
// - [`metrics`]: Pure transforms from fetched entities to derived metrics
// - [`analysis`]: Result assembly and run-scoped cancellation
// - [`reports`]: Console and JSON rendering of results

pub type Result<T, E = anyhow::Error> = core::result::Result<T, E>;

pub mod analysis;
pub mod commands;
pub mod facts;
pub mod metrics;
pub mod reports;

pub use crate::commands::{Host, run};
