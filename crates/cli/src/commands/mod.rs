//! CLI commands for the trader sentiment pipeline.

pub mod analyze;
pub mod export;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use export::{run_export, ExportArgs};

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use trader_sentiment_core::{AppConfig, ConfigLoader};

/// Input selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Config file path (defaults to config/Config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sentiment CSV (overrides paths.sentiment_csv)
    #[arg(long)]
    pub sentiment: Option<PathBuf>,

    /// Trade log CSV (overrides paths.trades_csv)
    #[arg(long)]
    pub trades: Option<PathBuf>,
}

impl InputArgs {
    /// Resolves configuration: file and environment first, then CLI paths.
    ///
    /// # Errors
    /// Returns an error if an explicit config file is missing or malformed.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ConfigLoader::load().context("Failed to load configuration")?,
        };

        if let Some(path) = &self.sentiment {
            config.paths.sentiment_csv.clone_from(path);
        }
        if let Some(path) = &self.trades {
            config.paths.trades_csv.clone_from(path);
        }

        Ok(config)
    }
}
