//! CLI command implementations.

pub mod once;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use trading_config::{load_config, AppConfig};
use trading_core::traits::SignalNotifier;
use trading_data::{BinanceConfig, BinanceFuturesSource, CandleCache};
use trading_indicators::IndicatorEngine;
use trading_notify::{DiscordConfig, DiscordWebhook, NoopNotifier};
use trading_signals::{RefreshLoop, SignalClassifier};

use crate::cli::SelectionArgs;

const DEFAULT_CONFIG: &str = "config/default.toml";

/// Load configuration from the given path, or the default file when it
/// exists, layered with environment overrides.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG)).filter(|p| p.exists()),
    };

    load_config(path.as_deref()).with_context(|| match &path {
        Some(p) => format!("Failed to load configuration from {}", p.display()),
        None => "Failed to load configuration from environment".to_string(),
    })
}

/// Apply command-line instrument selection on top of the configuration.
pub fn apply_selection(config: &mut AppConfig, selection: &SelectionArgs) {
    if let Some(timeframe) = selection.timeframe {
        config.monitor.timeframe = timeframe;
    }
    if !selection.symbols.is_empty() {
        config.monitor.instruments = selection
            .symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .collect();
    }
}

/// Discord when a webhook URL is configured, otherwise a no-op.
pub fn build_notifier(config: &AppConfig) -> Result<Arc<dyn SignalNotifier>> {
    match config.discord.webhook_url() {
        Some(url) => {
            let webhook = DiscordWebhook::new(DiscordConfig {
                webhook_url: url,
                timeout: config.exchange.request_timeout(),
            })
            .context("Invalid Discord webhook")?;
            info!("Discord notifications enabled");
            Ok(Arc::new(webhook))
        }
        None => {
            if config.discord.enabled {
                warn!(
                    env = %config.discord.webhook_url_env,
                    "Discord webhook URL not set; notifications disabled"
                );
            }
            Ok(Arc::new(NoopNotifier))
        }
    }
}

/// Wire source, cache, engine and classifier into a refresh loop.
pub fn build_refresh_loop(
    config: &AppConfig,
    notifier: Arc<dyn SignalNotifier>,
) -> Result<RefreshLoop> {
    let source = BinanceFuturesSource::new(BinanceConfig {
        base_url: config.exchange.base_url.clone(),
        request_timeout: config.exchange.request_timeout(),
    })
    .context("Failed to create exchange client")?;

    let cache = Arc::new(CandleCache::new(Arc::new(source), config.monitor.cache_ttl()));
    let engine = IndicatorEngine::new(config.indicators).context("Invalid indicator settings")?;
    let classifier = SignalClassifier::new(config.thresholds);

    info!(
        source = cache.source_name(),
        symbols = config.monitor.instruments.len(),
        timeframe = %config.monitor.timeframe,
        ttl_secs = config.monitor.cache_ttl().as_secs(),
        "Pipeline ready"
    );

    Ok(RefreshLoop::new(
        config.refresh_config(),
        cache,
        engine,
        classifier,
        notifier,
    ))
}
