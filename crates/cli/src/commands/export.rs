//! Export CLI command.
//!
//! Writes the sentiment-joined daily trader rows to CSV for use elsewhere.

use super::InputArgs;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use trader_sentiment_analysis::export_joined;

/// Arguments for the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination CSV for the joined dataset
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Runs the export command.
///
/// # Errors
/// Returns an error if configuration, loading or writing fails.
pub fn run_export(args: ExportArgs) -> Result<()> {
    let config = args.input.load_config()?;
    let data = export_joined(&config, &args.output)?;

    println!(
        "Exported {} joined rows to {}",
        data.joined.len(),
        args.output.display()
    );
    Ok(())
}
