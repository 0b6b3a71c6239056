use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;

use commands::{AnalyzeArgs, ExportArgs};

#[derive(Parser)]
#[command(name = "trader-sentiment")]
#[command(about = "Trader behaviour statistics segmented by market sentiment and leverage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join trades with sentiment, print summary stats and render the chart (default)
    Analyze(AnalyzeArgs),
    /// Write the sentiment-joined daily trader rows to CSV
    Export(ExportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Analyze(args)) => commands::run_analyze(args),
        Some(Commands::Export(args)) => commands::run_export(args),
        None => commands::run_analyze(AnalyzeArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line printed to stderr when a run fails.
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {err:#}. Ensure CSV files are in the same folder as this program.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use trader_sentiment_core::InsightsError;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_analyze() {
        let cli = Cli::try_parse_from(["trader-sentiment"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_accepts_path_overrides() {
        let cli = Cli::try_parse_from([
            "trader-sentiment",
            "analyze",
            "--sentiment",
            "fg.csv",
            "--trades",
            "fills.csv",
            "-o",
            "out.svg",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.input.sentiment.unwrap().to_str(), Some("fg.csv"));
                assert_eq!(args.input.trades.unwrap().to_str(), Some("fills.csv"));
                assert_eq!(args.output.unwrap().to_str(), Some("out.svg"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_shows_chart_unless_told_not_to() {
        let cli = Cli::try_parse_from(["trader-sentiment", "analyze"]).unwrap();
        match cli.command {
            Some(Commands::Analyze(args)) => assert!(!args.no_show),
            _ => panic!("expected analyze"),
        }

        let cli = Cli::try_parse_from(["trader-sentiment", "analyze", "--no-show"]).unwrap();
        match cli.command {
            Some(Commands::Analyze(args)) => assert!(args.no_show),
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn error_line_states_each_cause_once() {
        let err = anyhow::Error::from(InsightsError::io(
            "hyperliquid_trades.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        ));

        assert_eq!(
            error_line(&err),
            "Error: IO error on hyperliquid_trades.csv: No such file or directory. \
             Ensure CSV files are in the same folder as this program."
        );
    }

    #[test]
    fn error_line_keeps_context_chain() {
        let err = anyhow::Error::from(InsightsError::MissingColumn {
            file: "bitcoin_sentiment.csv".into(),
            column: "Classification".to_string(),
        })
        .context("Failed to load sentiment");

        assert_eq!(
            error_line(&err),
            "Error: Failed to load sentiment: bitcoin_sentiment.csv: missing required column \
             'Classification'. Ensure CSV files are in the same folder as this program."
        );
    }

    #[test]
    fn export_requires_output() {
        assert!(Cli::try_parse_from(["trader-sentiment", "export"]).is_err());
        assert!(Cli::try_parse_from(["trader-sentiment", "export", "--output", "joined.csv"]).is_ok());
    }
}
