//! Technical indicators for the signal pipeline.
//!
//! This crate provides:
//! - Simple moving average (SMA)
//! - Wilder-smoothed relative strength index (RSI)
//! - [`IndicatorEngine`], which turns a candle series into the snapshot the
//!   signal classifier consumes

pub mod engine;
pub mod momentum;
pub mod moving_average;

pub use engine::{EngineConfig, IndicatorEngine};
pub use momentum::Rsi;
pub use moving_average::Sma;
