//! Analyze CLI command.
//!
//! Runs the full pipeline, prints the summary tables, writes the chart and
//! opens it in the system viewer.

use super::InputArgs;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use trader_sentiment_analysis::{analyze_from, load_inputs, ReportFormatter};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Chart output path (overrides paths.chart_output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the chart without opening it (for headless runs)
    #[arg(long)]
    pub no_show: bool,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if configuration, loading, joining or rendering fails.
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = args.input.load_config()?;
    if let Some(output) = args.output {
        config.paths.chart_output = output;
    }

    tracing::info!(
        "Analyzing trades {} against sentiment {}",
        config.paths.trades_csv.display(),
        config.paths.sentiment_csv.display()
    );

    let inputs = load_inputs(&config)?;
    println!("{}", ReportFormatter::format_shape("Sentiment", &inputs.sentiment_report));
    println!("{}", ReportFormatter::format_shape("Trades", &inputs.trade_report));

    let outcome = analyze_from(&config, inputs)?;

    let note = ReportFormatter::format_join_note(&outcome.data.join_report);
    if !note.is_empty() {
        println!("{note}");
    }

    print!("{}", ReportFormatter::format_sentiment_summary(&outcome.by_sentiment));
    print!("{}", ReportFormatter::format_segment_summary(&outcome.by_segment));
    println!(
        "{}",
        ReportFormatter::format_completion(&outcome.chart_path.display().to_string())
    );

    if !args.no_show {
        show_chart(&outcome.chart_path);
    }

    Ok(())
}

/// Opens the written chart with the platform's default viewer. The chart is
/// already on disk, so a missing viewer only warns.
fn show_chart(path: &Path) {
    match opener::open(path) {
        Ok(()) => tracing::debug!("Opened {} in the system viewer", path.display()),
        Err(e) => tracing::warn!("Could not open {}: {}", path.display(), e),
    }
}
