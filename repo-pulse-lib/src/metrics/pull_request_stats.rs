use crate::facts::entities::{ItemState, PullRequest};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PullRequestStats {
    pub open: u64,
    pub closed: u64,

    /// Pull requests with a merge timestamp; these are also counted as closed.
    pub merged: u64,
}

#[must_use]
pub fn pull_request_stats(pull_requests: &[PullRequest]) -> PullRequestStats {
    pull_requests.iter().fold(PullRequestStats::default(), |mut stats, pr| {
        match pr.state {
            ItemState::Open => stats.open += 1,
            ItemState::Closed => stats.closed += 1,
        }
        if pr.merged_at.is_some() {
            stats.merged += 1;
        }
        stats
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_input() {
        assert_eq!(pull_request_stats(&[]), PullRequestStats::default());
    }

    #[test]
    fn test_merged_are_also_closed() {
        let merged_at = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let prs = vec![
            PullRequest::new(ItemState::Open, None),
            PullRequest::new(ItemState::Closed, None),
            PullRequest::new(ItemState::Closed, Some(merged_at)),
        ];

        assert_eq!(
            pull_request_stats(&prs),
            PullRequestStats {
                open: 1,
                closed: 2,
                merged: 1
            }
        );
    }

    #[test]
    fn test_merged_count_is_independent_of_state() {
        let merged_at = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let prs = vec![PullRequest::new(ItemState::Open, Some(merged_at)); 3];

        let stats = pull_request_stats(&prs);
        assert_eq!(stats.open, 3);
        assert_eq!(stats.merged, 3);
        assert!(stats.merged <= u64::try_from(prs.len()).unwrap());
    }
}
