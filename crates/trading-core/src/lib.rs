//! Core types and traits for the signal pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, CandleSeries, Timeframe)
//! - Indicator snapshots and signal categories
//! - Collaborator traits for candle sources and signal notifiers
//! - Price formatting shared by notifiers and render layers

pub mod types;
pub mod traits;
pub mod error;
pub mod format;

pub use error::TradingError;
pub use types::*;
pub use traits::*;
