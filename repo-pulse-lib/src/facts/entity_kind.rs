use serde::Serialize;
use strum::Display;

/// The kinds of entities fetched from the hosting API, one per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[strum(serialize = "repository")]
    Repository,

    #[strum(serialize = "user")]
    User,

    #[strum(serialize = "contributors")]
    Contributors,

    #[strum(serialize = "commits")]
    Commits,

    #[strum(serialize = "issues")]
    Issues,

    #[strum(serialize = "pull requests")]
    PullRequests,

    #[strum(serialize = "repositories")]
    Repositories,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_human_readable() {
        assert_eq!(EntityKind::PullRequests.to_string(), "pull requests");
        assert_eq!(EntityKind::Repository.to_string(), "repository");
    }

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_string(&EntityKind::PullRequests).unwrap();
        assert_eq!(json, "\"pull_requests\"");
    }
}
