//! Indicator snapshots and signal categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator values for the most recent candle of a series.
///
/// `None` means the series was too short to warm the indicator up. It is
/// never replaced by a numeric placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Open time of the candle the snapshot describes (Unix ms)
    pub open_time: i64,
    /// Latest closing price
    pub price: f64,
    /// Smoothed relative strength index
    pub rsi: Option<f64>,
    /// Fast simple moving average (SMA 9 by default)
    pub sma_fast: Option<f64>,
    /// Slow simple moving average (SMA 21 by default)
    pub sma_slow: Option<f64>,
}

impl IndicatorSnapshot {
    /// Snapshot with every derived field absent.
    pub fn warming_up(open_time: i64, price: f64) -> Self {
        Self {
            open_time,
            price,
            rsi: None,
            sma_fast: None,
            sma_slow: None,
        }
    }

    /// Check if every derived indicator is present.
    pub fn is_complete(&self) -> bool {
        self.rsi.is_some() && self.sma_fast.is_some() && self.sma_slow.is_some()
    }
}

/// Discrete signal state for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Oversold with price above a rising short-term trend
    StrongBuy,
    /// Weak momentum with price above the fast average
    Buy,
    /// Momentum above the overbought threshold
    Overbought,
    /// No actionable condition
    Hold,
    /// Not enough candles to evaluate
    Unavailable,
    /// Fetch or computation failed
    Error,
}

impl SignalKind {
    /// Check if this signal triggers a notification on entry.
    #[inline]
    pub fn is_actionable(&self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::Buy)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "STRONG BUY",
            SignalKind::Buy => "BUY",
            SignalKind::Overbought => "OVERBOUGHT",
            SignalKind::Hold => "HOLD",
            SignalKind::Unavailable => "Not Available",
            SignalKind::Error => "Error",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
