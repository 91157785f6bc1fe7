use super::Narrow;
use serde::{Deserialize, Serialize};

/// Public profile of a user, the primary lookup of a repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub login: String,
    pub name: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
}

impl UserInfo {
    /// The name to show for this user, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.login)
    }
}

#[derive(Debug, Deserialize)]
pub struct UserInfoWire {
    login: String,
    name: Option<String>,
    #[serde(default)]
    public_repos: u64,
    #[serde(default)]
    followers: u64,
}

impl Narrow for UserInfoWire {
    type Entity = UserInfo;

    fn narrow(self) -> Option<UserInfo> {
        Some(UserInfo {
            login: self.login,
            name: self.name,
            public_repos: self.public_repos,
            followers: self.followers,
        })
    }
}
