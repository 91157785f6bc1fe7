use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use anyhow::bail;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(long, short, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub output: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<i32> {
    if args.output.exists() && !args.force {
        bail!("'{}' already exists; pass --force to overwrite it", args.output.display());
    }

    Config::save_default(&args.output)?;
    writeln!(host.output(), "Wrote default configuration to '{}'", args.output.display())?;
    Ok(0)
}
