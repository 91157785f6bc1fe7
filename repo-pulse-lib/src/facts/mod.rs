//! Data collection from the repository hosting API
//!
//! This module is responsible for getting the raw entities an analysis is computed from:
//! a repository's information, contributors, recent commits, issues and pull requests,
//! or a user's profile and repository list.
//!
//! # Implementation Model
//!
//! The [`EntityFetcher`] issues one bounded request per [`Endpoint`] and classifies the
//! response into a [`FetchOutcome`]: `Found`, `RateLimited`, `NotFound` or
//! `TransientError`. It never retries.
//!
//! The [`FetchOrchestrator`] drives one run. It awaits the primary lookup first; if that
//! fails the run ends with a [`FetchError`]. Otherwise the secondary fetches run
//! concurrently and each one resolves into an [`EntitySlot`], which holds either the
//! fetched entities or an empty collection with an [`EmptyDataWarning`] explaining why.

pub mod entities;

mod endpoint;
mod entity_kind;
mod fetch_error;
mod fetch_outcome;
mod fetched_entities;
mod fetcher;
mod orchestrator;
mod progress;
mod progress_reporter;
mod repo_target;
mod request_tracker;

pub use endpoint::Endpoint;
pub use entity_kind::EntityKind;
pub use fetch_error::{EmptyDataWarning, FetchError, PrimaryTarget};
pub use fetch_outcome::{FailureReason, FetchOutcome, HttpStatus, Quota, RATE_LIMIT_REMAINING_HEADER, classify};
pub use fetched_entities::{EntitySlot, FetchedEntities, RepositoryListing};
pub use fetcher::{EntityFetcher, FetcherSettings};
pub use orchestrator::{FetchOrchestrator, RunOutcome, RunState};
pub use progress::{NoProgress, Progress};
pub use progress_reporter::ProgressReporter;
pub use repo_target::{RepoTarget, Target};
pub use request_tracker::{RequestCounts, RequestTracker};
