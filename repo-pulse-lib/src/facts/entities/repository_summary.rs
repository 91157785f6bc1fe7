use super::{Narrow, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a user's repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub primary_language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RepositorySummaryWire {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    language: Option<String>,
    updated_at: Option<String>,
}

impl Narrow for RepositorySummaryWire {
    type Entity = RepositorySummary;

    fn narrow(self) -> Option<RepositorySummary> {
        Some(RepositorySummary {
            name: self.name?,
            description: self.description.filter(|d| !d.is_empty()),
            stars: self.stargazers_count,
            forks: self.forks_count,
            primary_language: self.language,
            updated_at: timestamp(self.updated_at)?,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_narrow_summary() {
        let wire: RepositorySummaryWire = serde_json::from_value(json!({
            "id": 5,
            "name": "widget",
            "description": "",
            "stargazers_count": 10,
            "forks_count": 2,
            "language": null,
            "updated_at": "2024-05-05T05:05:05Z"
        }))
        .unwrap();
        let summary = wire.narrow().unwrap();
        assert_eq!(summary.name, "widget");
        assert_eq!(summary.description, None);
        assert_eq!(summary.primary_language, None);
        assert_eq!(summary.stars, 10);
    }
}
