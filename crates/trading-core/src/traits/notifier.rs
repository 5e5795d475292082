//! Signal notifier trait definitions.

use crate::error::NotificationError;
use crate::types::{SignalKind, Timeframe};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Outbound notification transport.
///
/// Delivery is fire-and-forget: the pipeline logs a returned error and moves
/// on. It never retries and never lets delivery affect a pass outcome.
#[async_trait]
pub trait SignalNotifier: Send + Sync {
    /// Announce an instrument entering an actionable signal.
    async fn notify_signal(
        &self,
        symbol: &str,
        signal: SignalKind,
        price: f64,
        timeframe: Timeframe,
    ) -> Result<(), NotificationError>;

    /// Report a completed, non-critical pass.
    async fn notify_heartbeat(
        &self,
        completed_at: DateTime<Utc>,
        next_refresh_in: Duration,
    ) -> Result<(), NotificationError>;

    /// Announce that monitoring has started.
    async fn notify_started(&self, timeframe: Timeframe) -> Result<(), NotificationError>;

    /// Check if the notifier delivers anywhere.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Get the notifier name.
    fn name(&self) -> &str;
}
