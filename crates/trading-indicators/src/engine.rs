//! Indicator snapshot engine.

use serde::{Deserialize, Serialize};
use trading_core::error::IndicatorError;
use trading_core::traits::Indicator;
use trading_core::types::{CandleSeries, IndicatorSnapshot};

use crate::momentum::Rsi;
use crate::moving_average::Sma;

/// Window lengths for the snapshot indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RSI smoothing period
    pub rsi_period: usize,
    /// Fast SMA window
    pub sma_fast: usize,
    /// Slow SMA window
    pub sma_slow: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            sma_fast: 9,
            sma_slow: 21,
        }
    }
}

impl EngineConfig {
    /// Validate the window lengths.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.rsi_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.sma_fast == 0 {
            return Err(IndicatorError::InvalidParameter(
                "Fast SMA window must be greater than 0".into(),
            ));
        }
        if self.sma_fast >= self.sma_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "Fast SMA window ({}) must be shorter than slow window ({})",
                self.sma_fast, self.sma_slow
            )));
        }
        Ok(())
    }

    /// Candles needed before any derived field is reported.
    pub fn warmup_period(&self) -> usize {
        (self.rsi_period + 1).max(self.sma_fast).max(self.sma_slow)
    }
}

/// Computes an [`IndicatorSnapshot`] for the latest candle of a series.
///
/// The snapshot is all-or-nothing: below the warm-up period (the longest
/// window, 21 candles by default) every derived field is `None` even if a
/// shorter indicator could already be computed. Output depends only on the
/// closing prices, so the same series always yields the same snapshot.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: EngineConfig,
    rsi: Rsi,
    sma_fast: Sma,
    sma_slow: Sma,
}

impl IndicatorEngine {
    /// Create an engine with validated window lengths.
    pub fn new(config: EngineConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self {
            config,
            rsi: Rsi::new(config.rsi_period),
            sma_fast: Sma::new(config.sma_fast),
            sma_slow: Sma::new(config.sma_slow),
        })
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Candles needed for a complete snapshot.
    pub fn warmup_period(&self) -> usize {
        self.rsi
            .period()
            .max(self.sma_fast.period())
            .max(self.sma_slow.period())
    }

    /// Compute the snapshot for the most recent candle.
    ///
    /// Fails only for an empty series.
    pub fn compute(&self, series: &CandleSeries) -> Result<IndicatorSnapshot, IndicatorError> {
        let last = series.last().ok_or(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        })?;

        if series.len() < self.warmup_period() {
            return Ok(IndicatorSnapshot::warming_up(last.open_time, last.close));
        }

        let closes = series.closes();
        Ok(IndicatorSnapshot {
            open_time: last.open_time,
            price: last.close,
            rsi: self.rsi.latest(&closes),
            sma_fast: self.sma_fast.latest(&closes),
            sma_slow: self.sma_slow.latest(&closes),
        })
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            config,
            rsi: Rsi::new(config.rsi_period),
            sma_fast: Sma::new(config.sma_fast),
            sma_slow: Sma::new(config.sma_slow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trading_core::types::{Candle, Timeframe};

    fn series_from_closes(closes: &[f64]) -> CandleSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64 * 3_600_000, c, c + 1.0, c - 1.0, c, 1000.0))
            .collect();
        CandleSeries::new("TEST", Timeframe::Hour1, candles)
    }

    fn wavy_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 4.0).collect()
    }

    #[test]
    fn test_warmup_period_is_longest_window() {
        let engine = IndicatorEngine::default();
        assert_eq!(engine.warmup_period(), 21);
        assert_eq!(EngineConfig::default().warmup_period(), 21);

        let rsi_bound = EngineConfig {
            rsi_period: 30,
            sma_fast: 9,
            sma_slow: 21,
        };
        assert_eq!(rsi_bound.warmup_period(), 31);
    }

    #[test]
    fn test_twenty_candles_are_not_enough() {
        let engine = IndicatorEngine::default();
        let snapshot = engine.compute(&series_from_closes(&wavy_closes(20))).unwrap();

        // RSI alone could be computed here, but the snapshot stays empty
        assert!(snapshot.rsi.is_none());
        assert!(snapshot.sma_fast.is_none());
        assert!(snapshot.sma_slow.is_none());
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_twenty_one_candles_fill_every_field() {
        let engine = IndicatorEngine::default();
        let closes = wavy_closes(21);
        let snapshot = engine.compute(&series_from_closes(&closes)).unwrap();

        assert!(snapshot.is_complete());
        assert_eq!(snapshot.price, closes[20]);
        assert_eq!(snapshot.open_time, 20 * 3_600_000);
        let rsi = snapshot.rsi.unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let engine = IndicatorEngine::default();
        let err = engine.compute(&series_from_closes(&[])).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_snapshot_is_reproducible() {
        let engine = IndicatorEngine::default();
        let series = series_from_closes(&wavy_closes(100));

        let first = engine.compute(&series).unwrap();
        let second = engine.compute(&series.clone()).unwrap();
        assert_eq!(first.rsi.map(f64::to_bits), second.rsi.map(f64::to_bits));
        assert_eq!(first, second);
    }

    #[test]
    fn test_flat_series_reports_rsi_100() {
        let engine = IndicatorEngine::default();
        let snapshot = engine.compute(&series_from_closes(&[42.0; 21])).unwrap();

        assert_eq!(snapshot.rsi, Some(100.0));
        assert_eq!(snapshot.sma_fast, Some(42.0));
        assert_eq!(snapshot.sma_slow, Some(42.0));
    }

    #[test]
    fn test_falling_series_rsi_zero_below_averages() {
        let engine = IndicatorEngine::default();
        let closes: Vec<f64> = (0..21).map(|i| 100.0 - i as f64).collect();
        let snapshot = engine.compute(&series_from_closes(&closes)).unwrap();

        assert_eq!(snapshot.rsi, Some(0.0));
        // Price is the lowest close, so it sits below both averages
        assert!(snapshot.price < snapshot.sma_fast.unwrap());
        assert!(snapshot.sma_fast.unwrap() < snapshot.sma_slow.unwrap());
    }

    #[test]
    fn test_capitulation_then_climb() {
        // One crash candle followed by a steady climb: the smoothed loss from
        // the crash keeps RSI low while both averages trend up.
        let engine = IndicatorEngine::default();
        let mut closes = vec![1000.0];
        closes.extend((0..39).map(|i| 100.0 + i as f64));
        let snapshot = engine.compute(&series_from_closes(&closes)).unwrap();

        assert_eq!(snapshot.price, 138.0);
        assert_eq!(snapshot.sma_fast, Some(134.0));
        assert_eq!(snapshot.sma_slow, Some(128.0));
        assert!(snapshot.rsi.unwrap() < 30.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            rsi_period: 14,
            sma_fast: 21,
            sma_slow: 9,
        };
        assert!(IndicatorEngine::new(config).is_err());

        let config = EngineConfig {
            rsi_period: 1,
            ..EngineConfig::default()
        };
        assert!(matches!(
            IndicatorEngine::new(config),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }
}
