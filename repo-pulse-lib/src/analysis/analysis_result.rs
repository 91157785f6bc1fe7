use crate::facts::entities::{Commit, Contributor, Issue, PullRequest, RepositoryInfo};
use crate::facts::{EmptyDataWarning, EntitySlot, FetchedEntities};
use crate::metrics::DerivedMetrics;
use serde::Serialize;

/// Everything one completed analysis run produced.
///
/// Raw entity collections keep their degradation markers, so a slot that failed to load
/// can be told apart from one that is truly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub repository: RepositoryInfo,
    pub contributors: EntitySlot<Contributor>,
    pub commits: EntitySlot<Commit>,
    pub issues: EntitySlot<Issue>,
    pub pull_requests: EntitySlot<PullRequest>,
    pub metrics: DerivedMetrics,
}

impl AnalysisResult {
    #[must_use]
    pub fn assemble(entities: FetchedEntities, metrics: DerivedMetrics) -> Self {
        let FetchedEntities {
            repository,
            contributors,
            commits,
            issues,
            pull_requests,
        } = entities;

        Self {
            repository,
            contributors,
            commits,
            issues,
            pull_requests,
            metrics,
        }
    }

    /// Markers of every degraded collection, in fetch order.
    pub fn warnings(&self) -> impl Iterator<Item = &EmptyDataWarning> {
        [
            self.contributors.warning(),
            self.commits.warning(),
            self.issues.warning(),
            self.pull_requests.warning(),
        ]
        .into_iter()
        .flatten()
    }
}
