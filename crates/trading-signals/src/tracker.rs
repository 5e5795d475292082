//! Per-instrument signal transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trading_core::types::SignalKind;

/// Last observed signal for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolState {
    pub symbol: String,
    pub last_signal: SignalKind,
    pub last_observed_at: DateTime<Utc>,
}

/// Outcome of recording one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Whether the transition should be announced
    pub notify: bool,
    /// Signal recorded before this one, if any
    pub previous: Option<SignalKind>,
}

/// Deduplicates notifications across passes.
///
/// A signal is announced when it is actionable and differs from the one
/// recorded before it. Every observation replaces the recorded signal,
/// including `Error` and `Unavailable`, so leaving an actionable state and
/// coming back announces again while staying in it does not.
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    states: HashMap<String, SymbolState>,
}

impl TransitionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a signal observed now.
    pub fn observe(&mut self, symbol: &str, signal: SignalKind) -> Observation {
        self.observe_at(symbol, signal, Utc::now())
    }

    /// Record a signal observed at `at`.
    pub fn observe_at(&mut self, symbol: &str, signal: SignalKind, at: DateTime<Utc>) -> Observation {
        let previous = match self.states.get_mut(symbol) {
            Some(state) => {
                let previous = state.last_signal;
                state.last_signal = signal;
                state.last_observed_at = at;
                Some(previous)
            }
            None => {
                self.states.insert(
                    symbol.to_string(),
                    SymbolState {
                        symbol: symbol.to_string(),
                        last_signal: signal,
                        last_observed_at: at,
                    },
                );
                None
            }
        };

        Observation {
            notify: signal.is_actionable() && previous != Some(signal),
            previous,
        }
    }

    /// Get the state for a symbol.
    pub fn state(&self, symbol: &str) -> Option<&SymbolState> {
        self.states.get(symbol)
    }

    /// Get the last recorded signal for a symbol.
    pub fn last_signal(&self, symbol: &str) -> Option<SignalKind> {
        self.states.get(symbol).map(|s| s.last_signal)
    }

    /// Number of tracked symbols.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over tracked states in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolState> {
        self.states.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn notify_sequence(signals: &[SignalKind]) -> Vec<bool> {
        let mut tracker = TransitionTracker::new();
        signals
            .iter()
            .map(|&s| tracker.observe("BTCUSDT", s).notify)
            .collect()
    }

    #[test]
    fn test_repeated_buy_notifies_once() {
        assert_eq!(
            notify_sequence(&[SignalKind::Buy, SignalKind::Buy]),
            vec![true, false]
        );
    }

    #[test]
    fn test_leaving_and_reentering_buy_notifies_again() {
        assert_eq!(
            notify_sequence(&[SignalKind::Buy, SignalKind::Hold, SignalKind::Buy]),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_buy_to_strong_buy_is_a_transition() {
        assert_eq!(
            notify_sequence(&[SignalKind::Buy, SignalKind::StrongBuy, SignalKind::Buy]),
            vec![true, true, true]
        );
    }

    #[test]
    fn test_error_resets_baseline_like_any_state() {
        assert_eq!(
            notify_sequence(&[
                SignalKind::StrongBuy,
                SignalKind::Error,
                SignalKind::StrongBuy,
                SignalKind::Unavailable,
                SignalKind::StrongBuy,
            ]),
            vec![true, false, true, false, true]
        );
    }

    #[test]
    fn test_non_actionable_never_notifies() {
        assert_eq!(
            notify_sequence(&[
                SignalKind::Hold,
                SignalKind::Overbought,
                SignalKind::Unavailable,
                SignalKind::Error,
                SignalKind::Hold,
            ]),
            vec![false; 5]
        );
    }

    #[test]
    fn test_symbols_are_tracked_independently() {
        let mut tracker = TransitionTracker::new();

        assert!(tracker.observe("BTCUSDT", SignalKind::Buy).notify);
        assert!(tracker.observe("ETHUSDT", SignalKind::Buy).notify);
        assert!(!tracker.observe("BTCUSDT", SignalKind::Buy).notify);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_state_records_latest_observation() {
        let mut tracker = TransitionTracker::new();
        assert!(tracker.is_empty());
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap();

        let first = tracker.observe_at("SOLUSDT", SignalKind::Hold, t0);
        assert_eq!(first.previous, None);
        let second = tracker.observe_at("SOLUSDT", SignalKind::Overbought, t1);
        assert_eq!(second.previous, Some(SignalKind::Hold));

        let state = tracker.state("SOLUSDT").unwrap();
        assert_eq!(state.last_signal, SignalKind::Overbought);
        assert_eq!(state.last_observed_at, t1);
        assert_eq!(tracker.last_signal("SOLUSDT"), Some(SignalKind::Overbought));
        assert_eq!(tracker.last_signal("XRPUSDT"), None);
    }
}
