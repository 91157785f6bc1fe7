use crate::facts::entities::Commit;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Number of distinct dates kept in the commit frequency series.
pub const COMMIT_WINDOW: usize = 14;

/// Commits authored on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitDay {
    pub date: NaiveDate,
    pub commits: u64,
}

/// Count commits per calendar date of `tz`.
///
/// Dates appear in the order they are first encountered in `commits`, and only the last
/// [`COMMIT_WINDOW`] of them are kept. The API lists commits newest first, so this window
/// follows encounter order rather than calendar recency.
#[must_use]
pub fn commit_frequency<Tz: TimeZone>(commits: &[Commit], tz: &Tz) -> Vec<CommitDay> {
    let mut days: Vec<CommitDay> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for commit in commits {
        let date = commit.author_date.with_timezone(tz).date_naive();
        match positions.entry(date) {
            Entry::Occupied(entry) => days[*entry.get()].commits += 1,
            Entry::Vacant(entry) => {
                let _ = entry.insert(days.len());
                days.push(CommitDay { date, commits: 1 });
            }
        }
    }

    let excess = days.len().saturating_sub(COMMIT_WINDOW);
    let _ = days.drain(..excess);
    days
}
