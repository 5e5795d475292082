use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;
use trading_core::error::NotificationError;
use trading_core::traits::SignalNotifier;
use trading_core::types::{SignalKind, Timeframe};

/// Notifier used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl SignalNotifier for NoopNotifier {
    async fn notify_signal(
        &self,
        symbol: &str,
        signal: SignalKind,
        _price: f64,
        _timeframe: Timeframe,
    ) -> Result<(), NotificationError> {
        debug!(symbol, %signal, "Notifications disabled, dropping signal");
        Ok(())
    }

    async fn notify_heartbeat(
        &self,
        _completed_at: DateTime<Utc>,
        _next_refresh_in: Duration,
    ) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn notify_started(&self, _timeframe: Timeframe) -> Result<(), NotificationError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_accepts_everything() {
        let notifier = NoopNotifier;

        assert!(!notifier.is_enabled());
        assert!(notifier
            .notify_signal("BTCUSDT", SignalKind::Buy, 1.0, Timeframe::Hour1)
            .await
            .is_ok());
        assert!(notifier
            .notify_heartbeat(Utc::now(), Duration::from_secs(300))
            .await
            .is_ok());
        assert!(notifier.notify_started(Timeframe::Hour1).await.is_ok());
    }
}
