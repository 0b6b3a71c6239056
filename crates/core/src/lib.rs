pub mod config;
pub mod config_loader;
pub mod error;

pub use config::{
    AnalysisConfig, AppConfig, PathsConfig, SentimentColumns, SideConfig, TradeColumns,
    UnknownSidePolicy,
};
pub use config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use error::{InsightsError, Result};
