use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub sentiment_columns: SentimentColumns,
    pub trade_columns: TradeColumns,
    pub sides: SideConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub sentiment_csv: PathBuf,
    pub trades_csv: PathBuf,
    pub chart_output: PathBuf,
}

/// Header names expected in the sentiment CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentColumns {
    pub date: String,
    pub classification: String,
}

/// Header names expected in the trade log CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeColumns {
    pub time: String,
    pub account: String,
    pub closed_pnl: String,
    pub leverage: String,
    pub size: String,
    pub symbol: String,
    pub side: String,
}

impl TradeColumns {
    /// All required trade columns in declaration order.
    #[must_use]
    pub fn required(&self) -> [&str; 7] {
        [
            self.time.as_str(),
            self.account.as_str(),
            self.closed_pnl.as_str(),
            self.leverage.as_str(),
            self.size.as_str(),
            self.symbol.as_str(),
            self.side.as_str(),
        ]
    }
}

/// What to do with a side value that is neither a long nor a short alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSidePolicy {
    /// Count the trade as short.
    #[default]
    Short,
    /// Leave the trade out of the long ratio.
    Skip,
    /// Fail the run.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideConfig {
    pub long_aliases: Vec<String>,
    pub short_aliases: Vec<String>,
    pub unknown: UnknownSidePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Mean daily leverage strictly above this is "High Leverage".
    pub leverage_threshold: f64,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sentiment_csv: PathBuf::from("bitcoin_sentiment.csv"),
            trades_csv: PathBuf::from("hyperliquid_trades.csv"),
            chart_output: PathBuf::from("insights_chart.svg"),
        }
    }
}

impl Default for SentimentColumns {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            classification: "Classification".to_string(),
        }
    }
}

impl Default for TradeColumns {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            account: "account".to_string(),
            closed_pnl: "closedPnL".to_string(),
            leverage: "leverage".to_string(),
            size: "size".to_string(),
            symbol: "symbol".to_string(),
            side: "side".to_string(),
        }
    }
}

impl Default for SideConfig {
    fn default() -> Self {
        Self {
            long_aliases: vec!["long".to_string()],
            short_aliases: vec!["short".to_string()],
            unknown: UnknownSidePolicy::Short,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            leverage_threshold: 10.0,
        }
    }
}
