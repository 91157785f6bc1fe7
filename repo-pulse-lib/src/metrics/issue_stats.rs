use crate::facts::entities::{Issue, ItemState};
use serde::Serialize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IssueStats {
    pub open: u64,
    pub closed: u64,

    /// Mean time from creation to close, in days, rounded to the nearest day.
    pub avg_resolution_days: i64,
}

/// Count open and closed issues and average how long closed ones took to resolve.
///
/// Pull request shadows are excluded. The average only covers closed issues that carry
/// both a creation and a close timestamp, and is 0 when there are none.
#[must_use]
pub fn issue_stats(issues: &[Issue]) -> IssueStats {
    let mut stats = IssueStats::default();
    let mut resolved = 0_u32;
    let mut total_days = 0.0_f64;

    for issue in issues.iter().filter(|i| !i.is_pull_request_shadow) {
        match issue.state {
            ItemState::Open => stats.open += 1,
            ItemState::Closed => {
                stats.closed += 1;
                if let (Some(created_at), Some(closed_at)) = (issue.created_at, issue.closed_at) {
                    #[expect(clippy::cast_precision_loss, reason = "millisecond spans are far below 2^52")]
                    let days = (closed_at - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
                    total_days += days;
                    resolved += 1;
                }
            }
        }
    }

    if resolved > 0 {
        stats.avg_resolution_days = round_half_up(total_days / f64::from(resolved));
    }

    stats
}

/// Round to the nearest integer, halves toward positive infinity.
#[expect(clippy::cast_possible_truncation, reason = "day counts fit comfortably in an i64")]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn closed_after(days: i64) -> Issue {
        Issue::new(ItemState::Closed, Some(created()), Some(created() + Duration::days(days)))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(issue_stats(&[]), IssueStats::default());
    }

    #[test]
    fn test_average_over_issues_with_both_timestamps() {
        let mut issues: Vec<_> = [2, 4, 6, 8].into_iter().map(closed_after).collect();
        issues.extend((0..3).map(|_| Issue::new(ItemState::Closed, Some(created()), None)));
        issues.extend((0..3).map(|_| Issue::new(ItemState::Closed, None, Some(created()))));

        let stats = issue_stats(&issues);
        assert_eq!(stats.closed, 10);
        assert_eq!(stats.open, 0);
        assert_eq!(stats.avg_resolution_days, 5);
    }

    #[test]
    fn test_pull_request_shadows_are_excluded() {
        let issues = vec![
            Issue::new(ItemState::Open, Some(created()), None),
            closed_after(3),
            Issue::pull_request_shadow(ItemState::Open),
            Issue::pull_request_shadow(ItemState::Closed),
        ];

        let stats = issue_stats(&issues);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.closed, 1);
        assert!(stats.open + stats.closed < u64::try_from(issues.len()).unwrap());
        assert_eq!(stats.avg_resolution_days, 3);
    }

    #[test]
    fn test_no_valid_subset_gives_zero() {
        let issues = vec![
            Issue::new(ItemState::Open, Some(created()), None),
            Issue::new(ItemState::Closed, Some(created()), None),
        ];
        assert_eq!(issue_stats(&issues).avg_resolution_days, 0);
    }

    #[test]
    fn test_open_issue_with_close_timestamp_does_not_count() {
        let reopened = Issue::new(ItemState::Open, Some(created()), Some(created() + Duration::days(30)));
        let stats = issue_stats(&[reopened, closed_after(1)]);
        assert_eq!(stats.avg_resolution_days, 1);
    }

    #[test]
    fn test_fractional_days_round_to_nearest() {
        let half = Issue::new(ItemState::Closed, Some(created()), Some(created() + Duration::hours(36)));
        assert_eq!(issue_stats(&[half]).avg_resolution_days, 2);

        let short = Issue::new(ItemState::Closed, Some(created()), Some(created() + Duration::hours(11)));
        assert_eq!(issue_stats(&[short]).avg_resolution_days, 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
    }
}
