use super::EmptyDataWarning;
use super::entities::{Commit, Contributor, Issue, PullRequest, RepositoryInfo, RepositorySummary, UserInfo};
use serde::Serialize;

/// The result slot of one secondary fetch: its entities, or an empty collection with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySlot<T> {
    items: Vec<T>,
    warning: Option<EmptyDataWarning>,
}

impl<T> EntitySlot<T> {
    #[must_use]
    pub const fn filled(items: Vec<T>) -> Self {
        Self { items, warning: None }
    }

    #[must_use]
    pub const fn degraded(warning: EmptyDataWarning) -> Self {
        Self {
            items: Vec::new(),
            warning: Some(warning),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn warning(&self) -> Option<&EmptyDataWarning> {
        self.warning.as_ref()
    }

    /// Returns `true` when the slot is empty because its fetch failed.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All entities of a completed repository run.
///
/// The repository itself is always present; each secondary collection may be degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedEntities {
    pub repository: RepositoryInfo,
    pub contributors: EntitySlot<Contributor>,
    pub commits: EntitySlot<Commit>,
    pub issues: EntitySlot<Issue>,
    pub pull_requests: EntitySlot<PullRequest>,
}

/// All entities of a completed repository listing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryListing {
    pub user: UserInfo,
    pub repositories: Vec<RepositorySummary>,
}
