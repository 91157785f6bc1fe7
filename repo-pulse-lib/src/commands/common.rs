use super::config::Config;
use crate::Result;
use crate::facts::{EntityFetcher, Progress, ProgressReporter, RequestTracker};
use clap::{Args, ValueEnum};
use log::LevelFilter;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Always,
    Never,
    Auto,
}

impl ColorMode {
    /// Whether output should be colored, given if it goes to a terminal.
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

/// Options shared by every command that talks to the API.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "console")]
    pub format: OutputFormat,

    /// When to color console output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Path to the configuration file [default: repo-pulse.toml in the current directory]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(&std::env::current_dir()?, self.config.as_deref())
    }

    #[must_use]
    pub fn use_colors(&self) -> bool {
        self.color.enabled(std::io::stdout().is_terminal())
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init_logging(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        let _ = builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Build a fetcher whose requests drive a delayed progress bar.
pub fn create_fetcher(config: &Config) -> Result<(EntityFetcher, Arc<dyn Progress>)> {
    let progress: Arc<dyn Progress> = Arc::new(ProgressReporter::new(config.progress_delay));
    let tracker = RequestTracker::new(Arc::clone(&progress));
    let fetcher = EntityFetcher::new(&config.fetcher_settings(), tracker)?;
    Ok((fetcher, progress))
}
