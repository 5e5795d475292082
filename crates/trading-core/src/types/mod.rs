//! Core data types for the signal pipeline.

mod candle;
mod signal;
mod timeframe;

pub use candle::{Candle, CandleSeries};
pub use signal::{IndicatorSnapshot, SignalKind};
pub use timeframe::Timeframe;
