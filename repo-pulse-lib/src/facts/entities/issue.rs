use super::{ItemState, Narrow, timestamp};
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// An issue as reported by the issues endpoint.
///
/// The issues endpoint also returns pull requests. Those records are kept, flagged
/// through `is_pull_request_shadow`, and excluded when issue metrics are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub state: ItemState,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub is_pull_request_shadow: bool,
}

impl Issue {
    #[must_use]
    pub const fn new(state: ItemState, created_at: Option<DateTime<Utc>>, closed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            state,
            created_at,
            closed_at,
            is_pull_request_shadow: false,
        }
    }

    #[must_use]
    pub const fn pull_request_shadow(state: ItemState) -> Self {
        Self {
            state,
            created_at: None,
            closed_at: None,
            is_pull_request_shadow: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueWire {
    state: Option<String>,
    created_at: Option<String>,
    closed_at: Option<String>,
    pull_request: Option<IgnoredAny>,
}

impl Narrow for IssueWire {
    type Entity = Issue;

    fn narrow(self) -> Option<Issue> {
        Some(Issue {
            state: self.state?.parse().ok()?,
            created_at: timestamp(self.created_at),
            closed_at: timestamp(self.closed_at),
            is_pull_request_shadow: self.pull_request.is_some(),
        })
    }
}
