//! Signal generation.
//!
//! This crate provides:
//! - [`SignalClassifier`]: ordered rules from indicator snapshot to signal
//! - [`TransitionTracker`]: per-instrument notification deduplication
//! - [`RefreshLoop`]: the periodic fetch, compute, classify and notify pass

pub mod classifier;
pub mod refresh;
pub mod tracker;

pub use classifier::{SignalClassifier, SignalRationale, Thresholds};
pub use refresh::{InstrumentReport, PassReport, RefreshConfig, RefreshLoop};
pub use tracker::{Observation, SymbolState, TransitionTracker};
