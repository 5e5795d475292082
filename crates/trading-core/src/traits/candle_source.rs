//! Candle source trait definitions.

use crate::error::DataError;
use crate::types::{CandleSeries, Timeframe};
use async_trait::async_trait;

/// Trait for upstream candle providers.
///
/// Implementations must bound every request with a timeout and surface
/// failure as a `DataError` rather than hang.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch the most recent candles.
    ///
    /// # Arguments
    /// * `symbol` - The instrument to fetch
    /// * `timeframe` - The candle interval
    /// * `limit` - Maximum number of candles to return
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
