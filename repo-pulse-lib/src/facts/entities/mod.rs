//! Domain entities decoded from the hosting API.
//!
//! Every payload is first decoded into a private wire structure that mirrors the
//! API's loose JSON shape, then narrowed into the public entity. Narrowing is where
//! required fields are enforced: a record that lacks one is dropped at the fetch
//! boundary and never reaches the analytics stage.

mod commit;
mod contributor;
mod issue;
mod item_state;
mod pull_request;
mod repository_info;
mod repository_summary;
mod user_info;

pub use commit::Commit;
pub use contributor::Contributor;
pub use issue::Issue;
pub use item_state::ItemState;
pub use pull_request::PullRequest;
pub use repository_info::RepositoryInfo;
pub use repository_summary::RepositorySummary;
pub use user_info::UserInfo;

pub(crate) use commit::CommitWire;
pub(crate) use contributor::ContributorWire;
pub(crate) use issue::IssueWire;
pub(crate) use pull_request::PullRequestWire;
pub(crate) use repository_info::RepositoryInfoWire;
pub(crate) use repository_summary::RepositorySummaryWire;
pub(crate) use user_info::UserInfoWire;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use url::Url;

/// Conversion from a wire record into its domain entity.
///
/// Returns `None` when the record is missing something the entity requires.
pub(crate) trait Narrow: DeserializeOwned {
    type Entity;

    fn narrow(self) -> Option<Self::Entity>;
}

/// Collection records keep timestamps and links as raw strings so that one malformed
/// value drops only its own record. These parse them, yielding `None` when unusable.
fn timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok()).map(|at| at.with_timezone(&Utc))
}

fn link(raw: Option<String>) -> Option<Url> {
    raw.and_then(|raw| Url::parse(&raw).ok())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_normalizes_to_utc() {
        let at = timestamp(Some("2024-03-05T19:20:00+02:00".into()));
        assert_eq!(at, Some(Utc.with_ymd_and_hms(2024, 3, 5, 17, 20, 0).unwrap()));
    }

    #[test]
    fn test_malformed_values_are_absent() {
        assert_eq!(timestamp(Some("yesterday".into())), None);
        assert_eq!(timestamp(None), None);
        assert_eq!(link(Some(String::new())), None);
        assert_eq!(link(Some("not a url".into())), None);
    }
}
