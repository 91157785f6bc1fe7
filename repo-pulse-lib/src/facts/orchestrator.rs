//! Sequencing of the fetches that make up one run.

use super::entities::{
    CommitWire, ContributorWire, IssueWire, Narrow, PullRequestWire, RepositoryInfoWire, RepositorySummaryWire, UserInfoWire,
};
use super::fetch_outcome::FailureReason;
use super::{
    EmptyDataWarning, Endpoint, EntityFetcher, EntitySlot, FetchError, FetchedEntities, PrimaryTarget, RepoTarget, RepositoryListing,
};
use strum::Display;

/// Log target for the fetch orchestrator
const LOG_TARGET: &str = "orchestrator";

/// Lifecycle of a single run.
///
/// `Idle → FetchingPrimary → {Fatal | FetchingSecondary} → Completed`. No state is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunState {
    Idle,
    FetchingPrimary,
    FetchingSecondary,
    Completed,
    Fatal,
}

impl RunState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::FetchingPrimary)
                | (Self::FetchingPrimary, Self::Fatal | Self::FetchingSecondary)
                | (Self::FetchingSecondary, Self::Completed)
        )
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The primary lookup failed; nothing else was fetched.
    Fatal(FetchError),

    /// The primary lookup succeeded; secondary slots may be degraded.
    Completed(T),
}

impl<T> RunOutcome<T> {
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RunOutcome<U> {
        match self {
            Self::Fatal(e) => RunOutcome::Fatal(e),
            Self::Completed(data) => RunOutcome::Completed(f(data)),
        }
    }

    /// Converts this outcome into a standard `Result`.
    pub fn into_result(self) -> Result<T, FetchError> {
        match self {
            Self::Fatal(e) => Err(e),
            Self::Completed(data) => Ok(data),
        }
    }
}

/// Drives the fetches of one run.
///
/// An orchestrator is consumed by the run it performs, so every target gets a fresh
/// instance and a finished run can never be resumed.
#[derive(Debug)]
pub struct FetchOrchestrator {
    fetcher: EntityFetcher,
    state: RunState,
}

impl FetchOrchestrator {
    #[must_use]
    pub const fn new(fetcher: EntityFetcher) -> Self {
        Self {
            fetcher,
            state: RunState::Idle,
        }
    }

    /// Fetch a repository and its activity.
    ///
    /// The repository lookup is awaited first; when it fails the run ends there. Otherwise
    /// contributors, commits, issues and pull requests are fetched concurrently. A missing
    /// collection counts as empty; any other failure degrades its slot.
    pub async fn fetch_repository(mut self, target: &RepoTarget) -> RunOutcome<FetchedEntities> {
        self.advance(RunState::FetchingPrimary);
        log::debug!(target: LOG_TARGET, "Looking up repository '{target}'");

        let repository = match self.fetcher.fetch_one::<RepositoryInfoWire>(&Endpoint::repository(target)).await.into_result() {
            Ok(info) => info,
            Err(reason) => return self.fail(PrimaryTarget::Repository(target.clone()), reason),
        };

        self.advance(RunState::FetchingSecondary);
        let per_page = self.fetcher.per_page();
        let (contributors, commits, issues, pull_requests) = tokio::join!(
            self.secondary::<ContributorWire>(Endpoint::contributors(target, per_page)),
            self.secondary::<CommitWire>(Endpoint::commits(target, per_page)),
            self.secondary::<IssueWire>(Endpoint::issues(target, per_page)),
            self.secondary::<PullRequestWire>(Endpoint::pull_requests(target, per_page)),
        );

        self.advance(RunState::Completed);
        RunOutcome::Completed(FetchedEntities {
            repository,
            contributors,
            commits,
            issues,
            pull_requests,
        })
    }

    /// Fetch a user's profile and their most recently updated repositories.
    ///
    /// Both lookups gate the run: the listing has no degradable part.
    pub async fn fetch_listing(mut self, login: &str) -> RunOutcome<RepositoryListing> {
        self.advance(RunState::FetchingPrimary);
        log::debug!(target: LOG_TARGET, "Looking up user '{login}'");

        let user = match self.fetcher.fetch_one::<UserInfoWire>(&Endpoint::user(login)).await.into_result() {
            Ok(user) => user,
            Err(reason) => return self.fail(PrimaryTarget::User(login.to_string()), reason),
        };

        let endpoint = Endpoint::user_repositories(login, self.fetcher.per_page());
        let repositories = match self.fetcher.fetch_many::<RepositorySummaryWire>(&endpoint).await.into_result() {
            Ok(repositories) => repositories,
            Err(reason) => return self.fail(PrimaryTarget::Repositories(login.to_string()), reason),
        };

        self.advance(RunState::FetchingSecondary);
        self.advance(RunState::Completed);
        RunOutcome::Completed(RepositoryListing { user, repositories })
    }

    async fn secondary<W: Narrow>(&self, endpoint: Endpoint) -> EntitySlot<W::Entity> {
        match self.fetcher.fetch_many::<W>(&endpoint).await.into_result() {
            Ok(items) => EntitySlot::filled(items),
            Err(FailureReason::NotFound) => {
                log::debug!(target: LOG_TARGET, "No {} found, treating as empty", endpoint.kind());
                EntitySlot::filled(Vec::new())
            }
            Err(reason) => {
                let warning = EmptyDataWarning::new(endpoint.kind(), reason);
                log::warn!(target: LOG_TARGET, "{warning}, continuing with analysis");
                EntitySlot::degraded(warning)
            }
        }
    }

    fn fail<T>(&mut self, target: PrimaryTarget, reason: FailureReason) -> RunOutcome<T> {
        self.advance(RunState::Fatal);
        let error = FetchError::from_primary(target, reason);
        log::debug!(target: LOG_TARGET, "Run ended at the primary lookup: {error}");
        RunOutcome::Fatal(error)
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(self.state.can_advance_to(next), "invalid run transition {} -> {next}", self.state);
        log::trace!(target: LOG_TARGET, "{} -> {next}", self.state);
        self.state = next;
    }
}
