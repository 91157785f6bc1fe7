use super::{EntityKind, RepoTarget};
use anyhow::anyhow;
use url::Url;

/// One bounded request against the hosting API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    kind: EntityKind,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl Endpoint {
    /// `GET /repos/{owner}/{repo}`
    #[must_use]
    pub fn repository(target: &RepoTarget) -> Self {
        Self::for_repo(EntityKind::Repository, target, None, Vec::new())
    }

    /// `GET /repos/{owner}/{repo}/contributors?per_page=N`
    #[must_use]
    pub fn contributors(target: &RepoTarget, per_page: u8) -> Self {
        Self::for_repo(EntityKind::Contributors, target, Some("contributors"), vec![("per_page", per_page.to_string())])
    }

    /// `GET /repos/{owner}/{repo}/commits?per_page=N`
    #[must_use]
    pub fn commits(target: &RepoTarget, per_page: u8) -> Self {
        Self::for_repo(EntityKind::Commits, target, Some("commits"), vec![("per_page", per_page.to_string())])
    }

    /// `GET /repos/{owner}/{repo}/issues?state=all&per_page=N`
    #[must_use]
    pub fn issues(target: &RepoTarget, per_page: u8) -> Self {
        Self::for_repo(
            EntityKind::Issues,
            target,
            Some("issues"),
            vec![("state", "all".into()), ("per_page", per_page.to_string())],
        )
    }

    /// `GET /repos/{owner}/{repo}/pulls?state=all&per_page=N`
    #[must_use]
    pub fn pull_requests(target: &RepoTarget, per_page: u8) -> Self {
        Self::for_repo(
            EntityKind::PullRequests,
            target,
            Some("pulls"),
            vec![("state", "all".into()), ("per_page", per_page.to_string())],
        )
    }

    /// `GET /users/{login}`
    #[must_use]
    pub fn user(login: &str) -> Self {
        Self {
            kind: EntityKind::User,
            segments: vec!["users".into(), login.into()],
            query: Vec::new(),
        }
    }

    /// `GET /users/{login}/repos?per_page=N&sort=updated`
    #[must_use]
    pub fn user_repositories(login: &str, per_page: u8) -> Self {
        Self {
            kind: EntityKind::Repositories,
            segments: vec!["users".into(), login.into(), "repos".into()],
            query: vec![("per_page", per_page.to_string()), ("sort", "updated".into())],
        }
    }

    fn for_repo(kind: EntityKind, target: &RepoTarget, leaf: Option<&str>, query: Vec<(&'static str, String)>) -> Self {
        let mut segments = vec!["repos".to_string(), target.owner().to_string(), target.name().to_string()];
        segments.extend(leaf.map(str::to_string));
        Self { kind, segments, query }
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The resource path, e.g. `/repos/octo/widget/commits`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Resolve this endpoint against the API base URL.
    ///
    /// The base may carry a path prefix (as GitHub Enterprise does with `/api/v3`).
    pub fn url(&self, base: &Url) -> crate::Result<Url> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| anyhow!("API URL '{base}' cannot be used as a base URL"))?;
            let _ = path.pop_if_empty().extend(&self.segments);
        }

        url.set_query(None);
        if !self.query.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}
