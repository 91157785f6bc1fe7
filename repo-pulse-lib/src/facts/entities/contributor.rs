use super::{Narrow, link};
use serde::{Deserialize, Serialize};
use url::Url;

/// An account that has authored commits to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
    pub avatar_url: Url,
}

impl Contributor {
    #[must_use]
    pub fn new(login: impl Into<String>, contributions: u64, avatar_url: Url) -> Self {
        Self {
            login: login.into(),
            contributions,
            avatar_url,
        }
    }
}

/// Anonymous contributors come back without a login or avatar; those are dropped.
#[derive(Debug, Deserialize)]
pub struct ContributorWire {
    login: Option<String>,
    #[serde(default)]
    contributions: u64,
    avatar_url: Option<String>,
}

impl Narrow for ContributorWire {
    type Entity = Contributor;

    fn narrow(self) -> Option<Contributor> {
        Some(Contributor {
            login: self.login?,
            contributions: self.contributions,
            avatar_url: link(self.avatar_url)?,
        })
    }
}
