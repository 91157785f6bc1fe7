//! Derived metrics.
//!
//! Every function here is a pure transform over fetched entities: it handles empty input,
//! never mutates what it is given, and returns the same output for the same input.

mod commit_frequency;
mod issue_stats;
mod pull_request_stats;
mod top_contributors;

pub use commit_frequency::{COMMIT_WINDOW, CommitDay, commit_frequency};
pub use issue_stats::{IssueStats, issue_stats};
pub use pull_request_stats::{PullRequestStats, pull_request_stats};
pub use top_contributors::{TOP_CONTRIBUTOR_LIMIT, TopContributor, top_contributors};

use crate::facts::FetchedEntities;
use chrono::TimeZone;
use serde::Serialize;

/// The full set of metrics derived for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedMetrics {
    pub top_contributors: Vec<TopContributor>,
    pub commit_frequency: Vec<CommitDay>,
    pub issue_stats: IssueStats,
    pub pull_request_stats: PullRequestStats,
}

impl DerivedMetrics {
    /// Compute every metric; commit dates are taken in `tz`.
    #[must_use]
    pub fn compute<Tz: TimeZone>(entities: &FetchedEntities, tz: &Tz) -> Self {
        Self {
            top_contributors: top_contributors(entities.contributors.items()),
            commit_frequency: commit_frequency(entities.commits.items(), tz),
            issue_stats: issue_stats(entities.issues.items()),
            pull_request_stats: pull_request_stats(entities.pull_requests.items()),
        }
    }
}
