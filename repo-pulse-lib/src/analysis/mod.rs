//! The analysis pipeline.
//!
//! Fetching, metric derivation and result assembly for one target, plus the session that
//! keeps only the newest run alive.

mod analysis_result;
mod session;

pub use analysis_result::AnalysisResult;
pub use session::{AnalysisSession, SessionOutcome};

use crate::facts::{EntityFetcher, FetchOrchestrator, RepoTarget, RepositoryListing, RunOutcome};
use crate::metrics::DerivedMetrics;
use chrono::TimeZone;

/// Log target for the analysis pipeline
const LOG_TARGET: &str = "analysis";

/// Run the full pipeline for one repository.
///
/// Commit dates are grouped by the calendar of `tz`.
pub async fn analyze_repository<Tz: TimeZone>(fetcher: &EntityFetcher, target: &RepoTarget, tz: &Tz) -> RunOutcome<AnalysisResult> {
    FetchOrchestrator::new(fetcher.clone())
        .fetch_repository(target)
        .await
        .map(|entities| {
            let metrics = DerivedMetrics::compute(&entities, tz);
            log::debug!(
                target: LOG_TARGET,
                "Derived metrics for '{target}': {} top contributors, {} commit days",
                metrics.top_contributors.len(),
                metrics.commit_frequency.len()
            );
            AnalysisResult::assemble(entities, metrics)
        })
}

/// Fetch a user's profile and repository summaries.
pub async fn list_repositories(fetcher: &EntityFetcher, login: &str) -> RunOutcome<RepositoryListing> {
    FetchOrchestrator::new(fetcher.clone()).fetch_listing(login).await
}
