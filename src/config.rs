//! Application configuration loading

use livechart::{ChartMode, EngineConfig, OhlcRange};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub market: MarketConfig,

    /// Engine tuning; omitted fields fall back to production defaults
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// OHLC endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider-native coin id (e.g. "ethereum")
    pub coin_id: String,

    /// Lookback used for the initial historical seed
    #[serde(default)]
    pub seed_range: OhlcRange,

    /// Frame projection for the demo output
    #[serde(default = "default_mode")]
    pub mode: ChartMode,
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_mode() -> ChartMode {
    ChartMode::Candlestick
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("market:\n  coin_id: ethereum\n").unwrap();
        assert_eq!(config.market.coin_id, "ethereum");
        assert_eq!(config.market.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.market.seed_range, OhlcRange::SevenDays);
        assert_eq!(config.market.mode, ChartMode::Candlestick);
        assert_eq!(config.engine.max_poll_ms, 60_000);
    }

    #[test]
    fn test_engine_overrides_are_partial() {
        let yaml = r#"
market:
  coin_id: bitcoin
  seed_range: 1d
  mode: line
engine:
  tick_interval_ms: 1000
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.market.seed_range, OhlcRange::OneDay);
        assert_eq!(config.market.mode, ChartMode::Line);
        assert_eq!(config.engine.tick_interval_ms, 1_000);
        assert_eq!(config.engine.transition_ms, 800);
    }
}
