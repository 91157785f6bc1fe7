use super::{ItemState, Narrow, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request as reported by the pulls endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub state: ItemState,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    #[must_use]
    pub const fn new(state: ItemState, merged_at: Option<DateTime<Utc>>) -> Self {
        Self { state, merged_at }
    }
}

#[derive(Debug, Deserialize)]
pub struct PullRequestWire {
    state: Option<String>,
    merged_at: Option<String>,
}

impl Narrow for PullRequestWire {
    type Entity = PullRequest;

    fn narrow(self) -> Option<PullRequest> {
        Some(PullRequest {
            state: self.state?.parse().ok()?,
            merged_at: timestamp(self.merged_at),
        })
    }
}
