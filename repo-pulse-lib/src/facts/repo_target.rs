use anyhow::{Context, bail};
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::Serialize;
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// A repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoTarget {
    owner: String,
    name: String,
}

impl RepoTarget {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for RepoTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What the user asked to look at: a whole account or one of its repositories.
///
/// Accepts GitHub URLs (`https://github.com/owner/repo`, `github.com/owner`) as well as
/// the `owner/repo` and `owner` shorthands. Path segments past the repository name
/// (`/tree/main`, `/issues`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    User(String),
    Repository(RepoTarget),
}

impl Target {
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::User(login) => login,
            Self::Repository(repo) => repo.owner(),
        }
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            bail!("Invalid GitHub URL: the target is empty");
        }

        let path = if input.contains("://") {
            let url = Url::parse(input).with_context(|| format!("parsing GitHub URL '{input}'"))?;
            if !url.host_str().is_some_and(|host| GITHUB_HOSTS.contains(&host)) {
                bail!("Please enter a valid GitHub URL, got '{input}'");
            }
            url.path().to_string()
        } else {
            GITHUB_HOSTS
                .iter()
                .find_map(|host| input.strip_prefix(host).and_then(|rest| rest.strip_prefix('/')))
                .unwrap_or(input)
                .to_string()
        };

        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let Some(owner) = segments.next() else {
            bail!("Invalid GitHub URL: no user or organization in '{input}'");
        };
        if !is_valid_owner(owner) {
            bail!("Please enter a valid GitHub URL, '{owner}' is not a GitHub user or organization name");
        }

        match segments.next() {
            None => Ok(Self::User(owner.to_string())),
            Some(repo) => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                if !is_valid_repo_name(repo) {
                    bail!("Invalid GitHub URL: '{repo}' is not a repository name");
                }
                Ok(Self::Repository(RepoTarget::new(owner, repo)))
            }
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::User(login) => write!(f, "{login}"),
            Self::Repository(repo) => write!(f, "{repo}"),
        }
    }
}

fn is_valid_owner(owner: &str) -> bool {
    !owner.starts_with('-') && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_repo_name(repo: &str) -> bool {
    !repo.is_empty() && repo != "." && repo != ".." && repo.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
