//! Candle sources and caching.

mod binance;
mod cache;

pub use binance::{parse_klines, BinanceConfig, BinanceFuturesSource};
pub use cache::{CacheEntry, CacheKey, CandleCache};
