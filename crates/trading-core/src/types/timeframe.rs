//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Candle interval.
///
/// `Display` yields the exchange interval code (`1h`), `label` the
/// human-readable form used in notifications (`1 hour`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute candles
    #[serde(rename = "1m")]
    Minute1,
    /// 5 minute candles
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute candles
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute candles
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour candles
    #[serde(rename = "1h")]
    #[default]
    Hour1,
    /// 4 hour candles
    #[serde(rename = "4h")]
    Hour4,
    /// Daily candles
    #[serde(rename = "1d")]
    Daily,
    /// Weekly candles
    #[serde(rename = "1w")]
    Weekly,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Minute30 => 1800,
            Timeframe::Hour1 => 3600,
            Timeframe::Hour4 => 14400,
            Timeframe::Daily => 86400,
            Timeframe::Weekly => 604800,
        }
    }

    /// Get the duration of one candle.
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.as_secs())
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1 minute",
            Timeframe::Minute5 => "5 minutes",
            Timeframe::Minute15 => "15 minutes",
            Timeframe::Minute30 => "30 minutes",
            Timeframe::Hour1 => "1 hour",
            Timeframe::Hour4 => "4 hours",
            Timeframe::Daily => "1 day",
            Timeframe::Weekly => "1 week",
        }
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Minute1,
            Timeframe::Minute5,
            Timeframe::Minute15,
            Timeframe::Minute30,
            Timeframe::Hour1,
            Timeframe::Hour4,
            Timeframe::Daily,
            Timeframe::Weekly,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1w",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "1min" | "1 minute" => Ok(Timeframe::Minute1),
            "5m" | "5min" | "5 minutes" => Ok(Timeframe::Minute5),
            "15m" | "15min" | "15 minutes" => Ok(Timeframe::Minute15),
            "30m" | "30min" | "30 minutes" => Ok(Timeframe::Minute30),
            "1h" | "1hour" | "1 hour" | "hour" => Ok(Timeframe::Hour1),
            "4h" | "4hour" | "4 hours" => Ok(Timeframe::Hour4),
            "1d" | "1 day" | "day" | "daily" => Ok(Timeframe::Daily),
            "1w" | "1 week" | "week" | "weekly" => Ok(Timeframe::Weekly),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_duration() {
        assert_eq!(Timeframe::Minute15.as_secs(), 900);
        assert_eq!(Timeframe::Hour1.as_secs(), 3600);
        assert_eq!(Timeframe::Hour4.as_duration(), Duration::from_secs(14400));
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("15m").unwrap(), Timeframe::Minute15);
        assert_eq!(Timeframe::from_str("1 hour").unwrap(), Timeframe::Hour1);
        assert_eq!(Timeframe::from_str("4 Hours").unwrap(), Timeframe::Hour4);
        assert!(Timeframe::from_str("3h").is_err());
    }

    #[test]
    fn test_timeframe_display_and_label() {
        assert_eq!(Timeframe::Minute30.to_string(), "30m");
        assert_eq!(Timeframe::Hour1.label(), "1 hour");
        for tf in Timeframe::all() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), *tf);
        }
    }

    #[test]
    fn test_timeframe_serde_uses_exchange_codes() {
        let json = serde_json::to_string(&Timeframe::Hour4).unwrap();
        assert_eq!(json, "\"4h\"");
        let parsed: Timeframe = serde_json::from_str("\"15m\"").unwrap();
        assert_eq!(parsed, Timeframe::Minute15);
    }
}
