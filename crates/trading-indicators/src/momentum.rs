//! Momentum indicators.

use trading_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// Follows Wilder: the average gain and loss are seeded with the mean of the
/// first `period` deltas, then smoothed forward. When the average loss is
/// zero the value is 100, which includes a series with no movement at all.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // (gain, loss) per step
        let moves: Vec<(f64, f64)> = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .collect();

        let n = self.period as f64;
        let (seed, rest) = moves.split_at(self.period);
        let mut avg_gain = seed.iter().map(|m| m.0).sum::<f64>() / n;
        let mut avg_loss = seed.iter().map(|m| m.1).sum::<f64>() / n;

        let mut result = Vec::with_capacity(rest.len() + 1);
        result.push(Self::value(avg_gain, avg_loss));
        for &(gain, loss) in rest {
            avg_gain = (avg_gain * (n - 1.0) + gain) / n;
            avg_loss = (avg_loss * (n - 1.0) + loss) / n;
            result.push(Self::value(avg_gain, avg_loss));
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
