use super::Host;
use super::common::{CommonArgs, OutputFormat, create_fetcher};
use super::repos::report_listing;
use crate::Result;
use crate::analysis::{AnalysisSession, SessionOutcome};
use crate::facts::Target;
use crate::reports;
use anyhow::bail;
use chrono::Local;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// GitHub URL (`https://github.com/owner/repo`) or `owner/repo` shorthand; an owner alone lists their repositories
    #[arg(value_name = "TARGET")]
    pub target: Target,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Analyze the target and write the report, returning the exit code.
pub async fn analyze<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<i32> {
    let config = args.common.load_config()?;
    let (fetcher, progress) = create_fetcher(&config)?;

    let target = match &args.target {
        Target::User(login) => return report_listing(host, fetcher, progress.as_ref(), login, &args.common).await,
        Target::Repository(target) => target,
    };

    progress.set_phase("Analyzing");
    let session = AnalysisSession::new(fetcher);
    let outcome = session.analyze(target, &Local).await;
    progress.done();

    let result = match outcome {
        SessionOutcome::Completed(result) => result,
        SessionOutcome::Fatal(e) => {
            writeln!(host.error(), "{e}")?;
            return Ok(super::EXIT_FAILURE);
        }
        SessionOutcome::Superseded => bail!("the analysis of '{target}' was cancelled"),
    };

    let mut out = host.output();
    match args.common.format {
        OutputFormat::Console => reports::generate_console(&result, args.common.use_colors(), Local::now(), &mut out)?,
        OutputFormat::Json => reports::generate_json(&*result, &mut out)?,
    }

    Ok(0)
}
