//! Command-line interface.

mod analyze;
mod common;
mod config;
mod init;
mod repos;

pub use analyze::{AnalyzeArgs, analyze};
pub use common::{ColorMode, CommonArgs, OutputFormat};
pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
pub use init::{InitArgs, init_config};
pub use repos::{ReposArgs, list_repos};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::ffi::OsString;
use std::io::Write;

/// Exit code for a run that ended fatally or a command that failed
pub const EXIT_FAILURE: i32 = 1;

/// Abstraction over the process environment, so commands can be driven from tests.
pub trait Host {
    /// Stream for reports.
    fn output(&mut self) -> impl Write;

    /// Stream for error messages.
    fn error(&mut self) -> impl Write;

    /// Terminate with the given exit code.
    fn exit(&mut self, code: i32);
}

#[derive(Parser, Debug)]
#[command(name = "repo-pulse", version, about = "Activity and health report for GitHub repositories", long_about = None)]
struct Cli {
    /// Log level filter, e.g. "debug" or "warn"; overrides `RUST_LOG`
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a repository, or list a user's repositories when given only an owner
    Analyze(AnalyzeArgs),

    /// List a user's most recently updated repositories
    Repos(ReposArgs),

    /// Write the default configuration file
    Init(InitArgs),
}

/// Parse `args` and run the selected command.
///
/// The host's `exit` is only called with a non-zero code: 1 when a command fails or a run
/// ends fatally, 2 on usage errors. Help and version output exit with 0.
pub async fn run<H, I, T>(host: &mut H, args: I)
where
    H: Host,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let code = e.exit_code();
            let rendered = e.render();
            let _ = if e.use_stderr() {
                write!(host.error(), "{rendered}")
            } else {
                write!(host.output(), "{rendered}")
            };
            if code != 0 {
                host.exit(code);
            }
            return;
        }
    };

    common::init_logging(cli.log_level);

    let result = match &cli.command {
        Command::Analyze(args) => analyze(host, args).await,
        Command::Repos(args) => list_repos(host, args).await,
        Command::Init(args) => init_config(host, args),
    };

    match result {
        Ok(0) => {}
        Ok(code) => host.exit(code),
        Err(e) => {
            let _ = writeln!(host.error(), "Error: {e:#}");
            host.exit(EXIT_FAILURE);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_analyze_with_options() {
        let cli = Cli::try_parse_from(["repo-pulse", "analyze", "rust-lang/rust", "--format", "json", "--color", "never"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.target.to_string(), "rust-lang/rust");
        assert_eq!(args.common.format, OutputFormat::Json);
        assert_eq!(args.common.color, ColorMode::Never);
    }

    #[test]
    fn test_log_level_is_global() {
        let cli = Cli::try_parse_from(["repo-pulse", "repos", "octocat", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn test_rejects_foreign_url() {
        let err = Cli::try_parse_from(["repo-pulse", "analyze", "https://gitlab.com/a/b"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
