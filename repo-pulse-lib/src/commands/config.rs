use crate::Result;
use crate::facts::FetcherSettings;
use anyhow::{Context, bail};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "repo-pulse.toml";

const MAX_PER_PAGE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the hosting API
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of items requested per collection endpoint (1..=100)
    #[serde(default = "default_per_page")]
    pub per_page: u8,

    /// Deadline applied to each request
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub fetch_deadline: Option<Duration>,

    /// How long a run must take before the progress bar appears
    #[serde(default = "default_progress_delay", with = "humantime_serde")]
    pub progress_delay: Duration,
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("static URL is valid")
}

fn default_user_agent() -> String {
    "repo-pulse".to_string()
}

const fn default_per_page() -> u8 {
    MAX_PER_PAGE
}

const fn default_progress_delay() -> Duration {
    Duration::from_secs(1)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `repo-pulse.toml` in `search_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(search_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).with_context(|| format!("reading configuration file '{}'", path.display()))?;
            (path.to_path_buf(), text)
        } else {
            let path = search_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).with_context(|| format!("reading configuration file '{}'", path.display())),
            }
        };

        let config: Self = toml::from_str(&text).with_context(|| format!("parsing configuration file '{}'", final_path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating configuration file '{}'", final_path.display()))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("writing default configuration to '{}'", output_path.display()))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or unusable
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            bail!("per_page must be between 1 and {MAX_PER_PAGE}, got {}", self.per_page);
        }

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        if self.api_url.cannot_be_a_base() {
            bail!("api_url '{}' cannot be used as a base URL", self.api_url);
        }

        Ok(())
    }

    #[must_use]
    pub fn fetcher_settings(&self) -> FetcherSettings {
        FetcherSettings {
            api_url: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            per_page: self.per_page,
            fetch_deadline: self.fetch_deadline,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
