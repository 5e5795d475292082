//! Candle caching.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::Instant;
use tracing::debug;
use trading_core::error::DataError;
use trading_core::traits::CandleSource;
use trading_core::types::{CandleSeries, Timeframe};

/// Cache key: one entry per (symbol, timeframe).
///
/// The fetch `limit` is not part of the key; an entry fetched with one limit
/// serves reads with another until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub timeframe: Timeframe,
}

impl CacheKey {
    pub fn new(symbol: &str, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.symbol, self.timeframe)
    }
}

/// The most recent successful fetch for a key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub series: Arc<CandleSeries>,
    pub fetched_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Check if the entry may still be served at `now`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < self.ttl
    }
}

type Slot = Arc<AsyncMutex<Option<CacheEntry>>>;

/// Time-bounded, single-flight candle cache.
///
/// Each key owns an async slot. A reader holds the slot for the whole
/// check-fetch-store sequence, so concurrent readers of an expired key queue
/// behind the one fetch in flight and then read what it stored. Failed
/// fetches leave the slot untouched and are retried by the next reader.
pub struct CandleCache {
    source: Arc<dyn CandleSource>,
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl CandleCache {
    /// Create a cache in front of `source`.
    pub fn new(source: Arc<dyn CandleSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the name of the upstream source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    fn slot(&self, key: &CacheKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    fn all_slots(&self) -> Vec<Slot> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().cloned().collect()
    }

    /// Get candles, fetching from the source on a miss or after expiry.
    pub async fn get(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Arc<CandleSeries>, DataError> {
        let key = CacheKey::new(symbol, timeframe);
        let slot = self.slot(&key);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(Instant::now()) {
                debug!(key = %key, candles = cached.series.len(), "Cache hit");
                return Ok(Arc::clone(&cached.series));
            }
        }

        debug!(key = %key, limit, source = self.source.name(), "Cache miss, fetching");
        let series = Arc::new(self.source.fetch_candles(symbol, timeframe, limit).await?);
        *entry = Some(CacheEntry {
            key,
            series: Arc::clone(&series),
            fetched_at: Instant::now(),
            ttl: self.ttl,
        });

        Ok(series)
    }

    /// Get the stored entry without fetching, fresh or not.
    pub async fn peek(&self, symbol: &str, timeframe: Timeframe) -> Option<CacheEntry> {
        let slot = self.slot(&CacheKey::new(symbol, timeframe));
        let entry = slot.lock().await;
        entry.clone()
    }

    /// Drop the entry for a key so the next read fetches.
    pub async fn invalidate(&self, symbol: &str, timeframe: Timeframe) {
        let slot = self.slot(&CacheKey::new(symbol, timeframe));
        *slot.lock().await = None;
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        for slot in self.all_slots() {
            *slot.lock().await = None;
        }
    }

    /// Count keys that currently hold an entry.
    pub async fn len(&self) -> usize {
        let mut count = 0;
        for slot in self.all_slots() {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    /// Check if no key holds an entry.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
