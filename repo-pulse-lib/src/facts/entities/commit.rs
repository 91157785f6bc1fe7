use super::{Narrow, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit, reduced to what commit cadence needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub author_date: DateTime<Utc>,

    /// Account linked to the commit author, absent when the email is not tied to an account.
    pub author_login: Option<String>,
}

impl Commit {
    #[must_use]
    pub const fn new(author_date: DateTime<Utc>, author_login: Option<String>) -> Self {
        Self { author_date, author_login }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommitWire {
    commit: Option<CommitBodyWire>,
    author: Option<AccountWire>,
}

#[derive(Debug, Deserialize)]
struct CommitBodyWire {
    author: Option<SignatureWire>,
}

#[derive(Debug, Deserialize)]
struct SignatureWire {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountWire {
    login: Option<String>,
}

impl Narrow for CommitWire {
    type Entity = Commit;

    fn narrow(self) -> Option<Commit> {
        let author_date = timestamp(self.commit?.author?.date)?;
        Some(Commit {
            author_date,
            author_login: self.author.and_then(|a| a.login),
        })
    }
}
