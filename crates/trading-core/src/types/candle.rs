//! Candle (OHLCV) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timeframe;

/// A single OHLCV candle.
/// Uses f64 for fast, reproducible indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time as Unix timestamp in milliseconds
    pub open_time: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(open_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the open time as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.open_time).unwrap_or_default()
    }
}

/// Candles for one (symbol, timeframe), ascending by open time.
///
/// Open times are unique; construction sorts the input and keeps the last
/// candle seen for a repeated open time. A series is never mutated after it
/// is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Timeframe of the candles
    pub timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from candles in any order.
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, mut candles: Vec<Candle>) -> Self {
        // Stable sort keeps arrival order among equal keys, so the dedup
        // below can retain the most recent arrival.
        candles.sort_by_key(|c| c.open_time);
        let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match deduped.last_mut() {
                Some(last) if last.open_time == candle.open_time => *last = candle,
                _ => deduped.push(candle),
            }
        }

        Self {
            symbol: symbol.into(),
            timeframe,
            candles: deduped,
        }
    }

    /// Get the number of candles.
    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get all candles, oldest first.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get the most recent candle.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Get an iterator over the candles.
    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open_time: i64, close: f64) -> Candle {
        Candle::new(open_time, close, close + 1.0, close - 1.0, close, 10.0)
    }

    #[test]
    fn test_series_sorts_by_open_time() {
        let series = CandleSeries::new(
            "BTCUSDT",
            Timeframe::Hour1,
            vec![candle(3, 103.0), candle(1, 101.0), candle(2, 102.0)],
        );

        let times: Vec<i64> = series.iter().map(|c| c.open_time).collect();
        assert_eq!(times, vec![1, 2, 3]);
        assert_eq!(series.last().unwrap().close, 103.0);
    }

    #[test]
    fn test_series_drops_duplicate_open_times() {
        let series = CandleSeries::new(
            "BTCUSDT",
            Timeframe::Hour1,
            vec![candle(1, 100.0), candle(2, 101.0), candle(2, 105.0)],
        );

        assert_eq!(series.len(), 2);
        // The later arrival for a repeated open time wins
        assert_eq!(series.closes(), vec![100.0, 105.0]);
    }

    #[test]
    fn test_candle_datetime() {
        let c = candle(1_700_000_000_000, 1.0);
        assert_eq!(c.datetime().timestamp_millis(), 1_700_000_000_000);
    }
}
