use crate::config::AppConfig;
use crate::error::{InsightsError, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";
pub const ENV_PREFIX: &str = "SENTIMENT_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging built-in defaults, `config/Config.toml`
    /// (if present) and `SENTIMENT_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Self::figment(Path::new(DEFAULT_CONFIG_PATH)).extract()?;
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.is_file() {
            return Err(InsightsError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            ));
        }

        let config: AppConfig = Self::figment(path).extract()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
