use super::Host;
use super::common::{CommonArgs, OutputFormat, create_fetcher};
use crate::Result;
use crate::analysis::list_repositories;
use crate::facts::{EntityFetcher, Progress, RunOutcome, Target};
use crate::reports;
use anyhow::bail;
use chrono::Local;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ReposArgs {
    /// GitHub username, or a profile URL such as `https://github.com/octocat`
    #[arg(value_name = "USER")]
    pub user: Target,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn list_repos<H: Host>(host: &mut H, args: &ReposArgs) -> Result<i32> {
    let Target::User(login) = &args.user else {
        bail!("expected a user, got the repository '{}'", args.user);
    };

    let config = args.common.load_config()?;
    let (fetcher, progress) = create_fetcher(&config)?;
    report_listing(host, fetcher, progress.as_ref(), login, &args.common).await
}

/// Fetch a user's repositories and write the report, returning the exit code.
pub(super) async fn report_listing<H: Host>(
    host: &mut H,
    fetcher: EntityFetcher,
    progress: &dyn Progress,
    login: &str,
    common: &CommonArgs,
) -> Result<i32> {
    progress.set_phase("Listing");
    let outcome = list_repositories(&fetcher, login).await;
    progress.done();

    let listing = match outcome {
        RunOutcome::Completed(listing) => listing,
        RunOutcome::Fatal(e) => {
            writeln!(host.error(), "{e}")?;
            return Ok(super::EXIT_FAILURE);
        }
    };

    let mut out = host.output();
    match common.format {
        OutputFormat::Console => reports::generate_console_listing(&listing, common.use_colors(), Local::now(), &mut out)?,
        OutputFormat::Json => reports::generate_json(&listing, &mut out)?,
    }

    Ok(0)
}
