//! Signal classification.
//!
//! Maps an indicator snapshot to one [`SignalKind`] by evaluating rules in a
//! fixed order; the first match wins:
//!
//! 1. any indicator missing → `Unavailable`
//! 2. `rsi < strong_buy_rsi` and `price > sma_fast > sma_slow` → `StrongBuy`
//! 3. `rsi < buy_rsi` and `price > sma_fast` → `Buy`
//! 4. `rsi > overbought_rsi` → `Overbought`
//! 5. otherwise → `Hold`
//!
//! All comparisons are strict, so a value sitting exactly on a threshold
//! falls through to the next rule.

use serde::{Deserialize, Serialize};
use trading_core::error::TradingError;
use trading_core::types::{IndicatorSnapshot, SignalKind};

/// RSI thresholds for the classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// RSI must be below this for a strong buy
    pub strong_buy_rsi: f64,
    /// RSI must be below this for a buy
    pub buy_rsi: f64,
    /// RSI above this is overbought
    pub overbought_rsi: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            strong_buy_rsi: 30.0,
            buy_rsi: 40.0,
            overbought_rsi: 70.0,
        }
    }
}

impl Thresholds {
    /// Validate the thresholds.
    pub fn validate(&self) -> Result<(), TradingError> {
        let all = [self.strong_buy_rsi, self.buy_rsi, self.overbought_rsi];
        if all.iter().any(|t| !(0.0..=100.0).contains(t)) {
            return Err(TradingError::Config(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        if self.strong_buy_rsi >= self.buy_rsi {
            return Err(TradingError::Config(
                "Strong buy threshold must be below buy threshold".into(),
            ));
        }
        if self.buy_rsi >= self.overbought_rsi {
            return Err(TradingError::Config(
                "Buy threshold must be below overbought threshold".into(),
            ));
        }
        Ok(())
    }
}

/// Pure snapshot classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier {
    thresholds: Thresholds,
}

impl SignalClassifier {
    /// Create a classifier with custom thresholds.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Get the thresholds.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify a snapshot.
    pub fn classify(&self, snapshot: &IndicatorSnapshot) -> SignalKind {
        let (Some(rsi), Some(sma_fast), Some(sma_slow)) =
            (snapshot.rsi, snapshot.sma_fast, snapshot.sma_slow)
        else {
            return SignalKind::Unavailable;
        };
        let price = snapshot.price;
        let t = &self.thresholds;

        if rsi < t.strong_buy_rsi && price > sma_fast && sma_fast > sma_slow {
            SignalKind::StrongBuy
        } else if rsi < t.buy_rsi && price > sma_fast {
            SignalKind::Buy
        } else if rsi > t.overbought_rsi {
            SignalKind::Overbought
        } else {
            SignalKind::Hold
        }
    }

    /// Evaluate the individual buy conditions for display.
    pub fn rationale(&self, snapshot: &IndicatorSnapshot) -> Option<SignalRationale> {
        SignalRationale::from_snapshot(snapshot, &self.thresholds)
    }
}

/// Which buy conditions a snapshot meets.
///
/// A buy needs the first two; a strong buy also needs the trend condition
/// and the stricter RSI bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRationale {
    pub price: f64,
    pub rsi: f64,
    pub sma_fast: f64,
    pub sma_slow: f64,
    /// `rsi < buy_rsi`
    pub rsi_below_buy: bool,
    /// `price > sma_fast`
    pub price_above_fast: bool,
    /// `sma_fast > sma_slow`
    pub fast_above_slow: bool,
}

impl SignalRationale {
    /// Build the checklist; `None` while any indicator is missing.
    pub fn from_snapshot(snapshot: &IndicatorSnapshot, thresholds: &Thresholds) -> Option<Self> {
        let rsi = snapshot.rsi?;
        let sma_fast = snapshot.sma_fast?;
        let sma_slow = snapshot.sma_slow?;

        Some(Self {
            price: snapshot.price,
            rsi,
            sma_fast,
            sma_slow,
            rsi_below_buy: rsi < thresholds.buy_rsi,
            price_above_fast: snapshot.price > sma_fast,
            fast_above_slow: sma_fast > sma_slow,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, rsi: f64, sma_fast: f64, sma_slow: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            open_time: 0,
            price,
            rsi: Some(rsi),
            sma_fast: Some(sma_fast),
            sma_slow: Some(sma_slow),
        }
    }

    fn classify(s: IndicatorSnapshot) -> SignalKind {
        SignalClassifier::default().classify(&s)
    }

    #[test]
    fn test_missing_field_is_unavailable() {
        // Would be a strong buy if complete
        let full = snapshot(110.0, 25.0, 105.0, 100.0);

        let cases = [
            IndicatorSnapshot { rsi: None, ..full },
            IndicatorSnapshot { sma_fast: None, ..full },
            IndicatorSnapshot { sma_slow: None, ..full },
            IndicatorSnapshot::warming_up(0, 110.0),
        ];
        for case in cases {
            assert_eq!(classify(case), SignalKind::Unavailable);
        }
    }

    #[test]
    fn test_strong_buy_takes_precedence_over_buy() {
        // Meets the buy rule as well
        assert_eq!(
            classify(snapshot(110.0, 25.0, 105.0, 100.0)),
            SignalKind::StrongBuy
        );
    }

    #[test]
    fn test_rsi_at_strong_buy_threshold_is_buy() {
        assert_eq!(
            classify(snapshot(110.0, 30.0, 105.0, 100.0)),
            SignalKind::Buy
        );
    }

    #[test]
    fn test_rsi_at_buy_threshold_is_hold() {
        assert_eq!(classify(snapshot(110.0, 40.0, 105.0, 120.0)), SignalKind::Hold);
        assert_eq!(classify(snapshot(110.0, 39.99, 105.0, 120.0)), SignalKind::Buy);
    }

    #[test]
    fn test_buy_without_trend() {
        // Oversold but the fast average is under the slow one
        assert_eq!(classify(snapshot(110.0, 20.0, 105.0, 108.0)), SignalKind::Buy);
    }

    #[test]
    fn test_price_below_fast_average_is_not_a_buy() {
        assert_eq!(classify(snapshot(100.0, 20.0, 105.0, 100.0)), SignalKind::Hold);
        assert_eq!(classify(snapshot(105.0, 20.0, 105.0, 100.0)), SignalKind::Hold);
    }

    #[test]
    fn test_overbought_boundary() {
        assert_eq!(classify(snapshot(110.0, 70.0, 105.0, 100.0)), SignalKind::Hold);
        assert_eq!(
            classify(snapshot(110.0, 70.01, 105.0, 100.0)),
            SignalKind::Overbought
        );
        assert_eq!(
            classify(snapshot(50.0, 100.0, 50.0, 50.0)),
            SignalKind::Overbought
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = SignalClassifier::new(Thresholds {
            strong_buy_rsi: 20.0,
            buy_rsi: 35.0,
            overbought_rsi: 80.0,
        });

        assert_eq!(
            classifier.classify(&snapshot(110.0, 25.0, 105.0, 100.0)),
            SignalKind::Buy
        );
        assert_eq!(
            classifier.classify(&snapshot(110.0, 75.0, 105.0, 100.0)),
            SignalKind::Hold
        );
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Thresholds::default().validate().is_ok());

        let disordered = Thresholds {
            strong_buy_rsi: 45.0,
            ..Thresholds::default()
        };
        assert!(disordered.validate().is_err());

        let coinciding = Thresholds {
            strong_buy_rsi: 40.0,
            buy_rsi: 40.0,
            ..Thresholds::default()
        };
        assert!(coinciding.validate().is_err());

        let out_of_range = Thresholds {
            overbought_rsi: 120.0,
            ..Thresholds::default()
        };
        assert!(out_of_range.validate().is_err());

        let overlapping = Thresholds {
            buy_rsi: 70.0,
            ..Thresholds::default()
        };
        assert!(overlapping.validate().is_err());
    }

    #[test]
    fn test_rationale_checklist() {
        let classifier = SignalClassifier::default();
        let r = classifier
            .rationale(&snapshot(110.0, 45.0, 105.0, 106.0))
            .unwrap();

        assert!(!r.rsi_below_buy);
        assert!(r.price_above_fast);
        assert!(!r.fast_above_slow);
        assert_eq!(r.rsi, 45.0);

        assert!(classifier
            .rationale(&IndicatorSnapshot::warming_up(0, 1.0))
            .is_none());
    }
}
