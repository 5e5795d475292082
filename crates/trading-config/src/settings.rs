//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trading_core::error::TradingError;
use trading_core::types::Timeframe;
use trading_indicators::EngineConfig;
use trading_signals::{RefreshConfig, Thresholds};

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub indicators: EngineConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub exchange: ExchangeSettings,
    #[serde(default)]
    pub discord: DiscordSettings,
}

impl AppConfig {
    /// Check cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), TradingError> {
        let monitor = &self.monitor;

        if monitor.instruments.is_empty() {
            return Err(TradingError::Config("No instruments configured".into()));
        }
        if let Some(blank) = monitor.instruments.iter().find(|s| s.trim().is_empty()) {
            return Err(TradingError::Config(format!(
                "Blank instrument symbol: {blank:?}"
            )));
        }
        if monitor.refresh_interval_secs == 0 {
            return Err(TradingError::Config(
                "Refresh interval must be greater than 0".into(),
            ));
        }
        if monitor.fetch_timeout_secs == 0 {
            return Err(TradingError::Config(
                "Fetch timeout must be greater than 0".into(),
            ));
        }

        self.indicators
            .validate()
            .map_err(|e| TradingError::Config(e.to_string()))?;

        let warmup = self.indicators.warmup_period();
        if monitor.candle_limit < warmup {
            return Err(TradingError::Config(format!(
                "Candle limit ({}) is below the indicator warm-up of {} candles",
                monitor.candle_limit, warmup
            )));
        }

        self.thresholds.validate()?;

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(TradingError::Config(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Render the effective configuration.
    pub fn to_toml(&self) -> Result<String, TradingError> {
        toml::to_string_pretty(self).map_err(|e| TradingError::Serialization(e.to_string()))
    }

    /// Refresh loop settings derived from the monitor section.
    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig {
            symbols: self.monitor.instruments.clone(),
            timeframe: self.monitor.timeframe,
            candle_limit: self.monitor.candle_limit,
            refresh_interval: self.monitor.refresh_interval(),
            fetch_timeout: self.monitor.fetch_timeout(),
        }
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-watch".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for daily-rotated log files
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// What to monitor and how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Instruments in display order
    pub instruments: Vec<String>,
    pub timeframe: Timeframe,
    pub refresh_interval_secs: u64,
    /// Defaults to the refresh interval
    pub cache_ttl_secs: Option<u64>,
    pub candle_limit: usize,
    pub fetch_timeout_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            instruments: [
                "BTCUSDT", "ETHUSDT", "SOLUSDT", "XRPUSDT", "DOGEUSDT", "BNBUSDT", "ADAUSDT",
                "AVAXUSDT", "LINKUSDT", "MATICUSDT",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            timeframe: Timeframe::Hour1,
            refresh_interval_secs: 300,
            cache_ttl_secs: None,
            candle_limit: 100,
            fetch_timeout_secs: 10,
        }
    }
}

impl MonitorSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(self.refresh_interval_secs))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Exchange REST settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://fapi2.binance.com".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ExchangeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Discord webhook settings.
///
/// The URL itself never lives in the file; `webhook_url_env` names the
/// environment variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordSettings {
    pub webhook_url_env: String,
    pub enabled: bool,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            webhook_url_env: "DISCORD_WEBHOOK_URL".to_string(),
            enabled: true,
        }
    }
}

impl DiscordSettings {
    /// Resolve the webhook URL. `None` when disabled or unset.
    pub fn webhook_url(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        std::env::var(&self.webhook_url_env)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}
