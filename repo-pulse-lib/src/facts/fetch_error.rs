//! Failure taxonomy of an analysis run.

use super::fetch_outcome::{FailureReason, HttpStatus, Quota};
use super::{EntityKind, RepoTarget};
use core::fmt::{Display, Formatter, Result as FmtResult};
use reqwest::StatusCode;
use serde::Serialize;

/// What a run's primary lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryTarget {
    Repository(RepoTarget),
    User(String),

    /// The repository list of a user.
    Repositories(String),
}

impl PrimaryTarget {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Repository(_) => EntityKind::Repository,
            Self::User(_) => EntityKind::User,
            Self::Repositories(_) => EntityKind::Repositories,
        }
    }

    const fn identifier_hint(&self) -> &'static str {
        match self {
            Self::Repository(_) => "repository name",
            Self::User(_) | Self::Repositories(_) => "username",
        }
    }
}

impl Display for PrimaryTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Repository(repo) => write!(f, "Repository \"{repo}\""),
            Self::User(login) => write!(f, "User \"{login}\""),
            Self::Repositories(login) => write!(f, "Repositories of \"{login}\""),
        }
    }
}

/// A failure that ends a run: the primary lookup did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{target} not found. Please check the {hint} and try again.")]
    NotFound { target: PrimaryTarget, hint: &'static str },

    #[error("GitHub API rate limit reached. Remaining requests: {remaining}. Try again later.")]
    RateLimited { remaining: Quota },

    #[error("Error fetching {entity} data. Status: {status}")]
    Transient { entity: EntityKind, status: HttpStatus },

    #[error("Failed to fetch repositories. Status: {status}")]
    RepositoriesUnavailable { status: HttpStatus },
}

impl FetchError {
    /// Build the fatal error for a failed primary lookup.
    #[must_use]
    pub fn from_primary(target: PrimaryTarget, reason: FailureReason) -> Self {
        match (target, reason) {
            (_, FailureReason::RateLimited(remaining)) => Self::RateLimited { remaining },
            (PrimaryTarget::Repositories(_), FailureReason::NotFound) => Self::RepositoriesUnavailable {
                status: HttpStatus::from(StatusCode::NOT_FOUND),
            },
            (PrimaryTarget::Repositories(_), FailureReason::Transient(status)) => Self::RepositoriesUnavailable { status },
            (target, FailureReason::NotFound) => {
                let hint = target.identifier_hint();
                Self::NotFound { target, hint }
            }
            (target, FailureReason::Transient(status)) => Self::Transient {
                entity: target.kind(),
                status,
            },
        }
    }
}

/// A secondary fetch that degraded to an empty collection.
///
/// This is not an error: the run continues and metrics are computed from what is
/// available. The marker stays on the slot so an empty collection caused by a failure
/// can be told apart from one that is truly empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyDataWarning {
    pub entity: EntityKind,
    pub reason: FailureReason,
}

impl EmptyDataWarning {
    #[must_use]
    pub const fn new(entity: EntityKind, reason: FailureReason) -> Self {
        Self { entity, reason }
    }
}

impl Display for EmptyDataWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} unavailable: {}", self.entity, self.reason)
    }
}
