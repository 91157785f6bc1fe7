use super::Narrow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level information about a repository.
///
/// This is the primary lookup of an analysis run: a run without it is not valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,

    /// Accounts subscribed to notifications, which the API calls subscribers.
    pub watchers: u64,
    pub forks: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub open_issues_count: u64,
    pub default_branch: String,

    /// SPDX identifier when the API recognized the license, its display name otherwise.
    pub license: Option<String>,
    pub primary_language: Option<String>,
    pub owner_login: String,
    pub html_url: Url,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryInfoWire {
    name: String,
    description: Option<String>,
    stargazers_count: u64,
    subscribers_count: Option<u64>,
    #[serde(default)]
    watchers_count: u64,
    forks_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    open_issues_count: u64,
    default_branch: String,
    license: Option<LicenseWire>,
    language: Option<String>,
    owner: OwnerWire,
    html_url: Url,
}

#[derive(Debug, Deserialize)]
struct LicenseWire {
    spdx_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwnerWire {
    login: String,
}

impl LicenseWire {
    fn into_label(self) -> Option<String> {
        // "NOASSERTION" is what the API reports for a license file it could not classify
        match self.spdx_id {
            Some(id) if !id.is_empty() && id != "NOASSERTION" => Some(id),
            _ => self.name.filter(|name| !name.is_empty()),
        }
    }
}

impl Narrow for RepositoryInfoWire {
    type Entity = RepositoryInfo;

    fn narrow(self) -> Option<RepositoryInfo> {
        Some(RepositoryInfo {
            name: self.name,
            description: self.description.filter(|d| !d.is_empty()),
            stars: self.stargazers_count,
            watchers: self.subscribers_count.unwrap_or(self.watchers_count),
            forks: self.forks_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
            open_issues_count: self.open_issues_count,
            default_branch: self.default_branch,
            license: self.license.and_then(LicenseWire::into_label),
            primary_language: self.language,
            owner_login: self.owner.login,
            html_url: self.html_url,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "widget",
            "full_name": "octo/widget",
            "description": "Widgets for everyone",
            "stargazers_count": 42,
            "watchers_count": 42,
            "subscribers_count": 7,
            "forks_count": 3,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-06-01T12:00:00Z",
            "open_issues_count": 5,
            "default_branch": "main",
            "license": { "key": "mit", "name": "MIT License", "spdx_id": "MIT" },
            "language": "Rust",
            "owner": { "login": "octo", "id": 9 },
            "html_url": "https://github.com/octo/widget"
        })
    }

    #[test]
    fn test_narrow_full_payload() {
        let wire: RepositoryInfoWire = serde_json::from_value(payload()).unwrap();
        let info = wire.narrow().unwrap();
        assert_eq!(info.name, "widget");
        assert_eq!(info.stars, 42);
        assert_eq!(info.watchers, 7);
        assert_eq!(info.license.as_deref(), Some("MIT"));
        assert_eq!(info.primary_language.as_deref(), Some("Rust"));
        assert_eq!(info.owner_login, "octo");
        assert_eq!(info.html_url.as_str(), "https://github.com/octo/widget");
    }

    #[test]
    fn test_watchers_fall_back_when_subscribers_missing() {
        let mut value = payload();
        let _ = value.as_object_mut().unwrap().remove("subscribers_count");
        let wire: RepositoryInfoWire = serde_json::from_value(value).unwrap();
        assert_eq!(wire.narrow().unwrap().watchers, 42);
    }

    #[test]
    fn test_unclassified_license_uses_name() {
        let mut value = payload();
        value["license"] = json!({ "key": "other", "name": "Other", "spdx_id": "NOASSERTION" });
        let wire: RepositoryInfoWire = serde_json::from_value(value).unwrap();
        assert_eq!(wire.narrow().unwrap().license.as_deref(), Some("Other"));
    }

    #[test]
    fn test_null_license_and_language() {
        let mut value = payload();
        value["license"] = serde_json::Value::Null;
        value["language"] = serde_json::Value::Null;
        value["description"] = serde_json::Value::Null;
        let info = serde_json::from_value::<RepositoryInfoWire>(value).unwrap().narrow().unwrap();
        assert_eq!(info.license, None);
        assert_eq!(info.primary_language, None);
        assert_eq!(info.description, None);
    }

    #[test]
    fn test_missing_required_field_fails_decoding() {
        let mut value = payload();
        let _ = value.as_object_mut().unwrap().remove("owner");
        let _ = serde_json::from_value::<RepositoryInfoWire>(value).unwrap_err();
    }
}
