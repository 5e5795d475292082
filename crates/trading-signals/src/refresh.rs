//! Polling passes over the configured instruments.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};
use trading_core::error::DataError;
use trading_core::traits::SignalNotifier;
use trading_core::types::{IndicatorSnapshot, SignalKind, Timeframe};
use trading_data::CandleCache;
use trading_indicators::IndicatorEngine;

use crate::classifier::SignalClassifier;
use crate::tracker::TransitionTracker;

/// What a refresh loop polls and how often.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Instruments, in display order
    pub symbols: Vec<String>,
    /// Candle interval
    pub timeframe: Timeframe,
    /// Candles requested per fetch
    pub candle_limit: usize,
    /// Sleep between passes
    pub refresh_interval: Duration,
    /// Upper bound on one instrument's fetch
    pub fetch_timeout: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            timeframe: Timeframe::Hour1,
            candle_limit: 100,
            refresh_interval: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of one instrument within a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub symbol: String,
    /// Latest close, when candles were fetched
    pub price: Option<f64>,
    pub snapshot: Option<IndicatorSnapshot>,
    pub signal: SignalKind,
    /// Whether candles were fetched this pass
    pub fetched: bool,
    /// Whether the signal was announced
    pub notified: bool,
    pub error: Option<String>,
}

impl InstrumentReport {
    fn fetch_failed(symbol: &str, err: &DataError) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: None,
            snapshot: None,
            signal: SignalKind::Error,
            fetched: false,
            notified: false,
            error: Some(err.to_string()),
        }
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// 1-based pass counter
    pub pass: u64,
    pub timeframe: Timeframe,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One record per configured instrument, in configured order
    pub records: Vec<InstrumentReport>,
    /// Set when no instrument could be fetched
    pub critical_failure: bool,
    /// Time until the next pass starts
    pub next_refresh_in: Duration,
}

impl PassReport {
    /// Records whose candles were fetched.
    pub fn successful(&self) -> impl Iterator<Item = &InstrumentReport> {
        self.records.iter().filter(|r| r.fetched)
    }

    /// Number of instruments whose fetch failed.
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.fetched).count()
    }

    /// Number of signal notifications sent.
    pub fn notified_count(&self) -> usize {
        self.records.iter().filter(|r| r.notified).count()
    }

    /// Find the record for a symbol.
    pub fn record(&self, symbol: &str) -> Option<&InstrumentReport> {
        self.records.iter().find(|r| r.symbol == symbol)
    }
}

/// Drives fetch → compute → classify → track for every instrument.
///
/// Owns the [`TransitionTracker`]; it is only touched between the concurrent
/// fetch phase of a pass and the end of that pass. Reports are published on
/// a watch channel for presentation layers.
pub struct RefreshLoop {
    config: RefreshConfig,
    cache: Arc<CandleCache>,
    engine: IndicatorEngine,
    classifier: SignalClassifier,
    tracker: TransitionTracker,
    notifier: Arc<dyn SignalNotifier>,
    reports: watch::Sender<Option<PassReport>>,
    passes: u64,
    started: bool,
}

impl RefreshLoop {
    /// Create a loop with an empty tracker.
    pub fn new(
        config: RefreshConfig,
        cache: Arc<CandleCache>,
        engine: IndicatorEngine,
        classifier: SignalClassifier,
        notifier: Arc<dyn SignalNotifier>,
    ) -> Self {
        let (reports, _) = watch::channel(None);
        Self {
            config,
            cache,
            engine,
            classifier,
            tracker: TransitionTracker::new(),
            notifier,
            reports,
            passes: 0,
            started: false,
        }
    }

    /// Get the loop configuration.
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Get the transition tracker.
    pub fn tracker(&self) -> &TransitionTracker {
        &self.tracker
    }

    /// Get the classifier.
    pub fn classifier(&self) -> &SignalClassifier {
        &self.classifier
    }

    /// Subscribe to pass reports. Holds `None` until the first pass ends.
    pub fn subscribe(&self) -> watch::Receiver<Option<PassReport>> {
        self.reports.subscribe()
    }

    /// Send the started notification. Only the first call sends.
    pub async fn announce_start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        info!(
            timeframe = %self.config.timeframe,
            symbols = self.config.symbols.len(),
            notifier = self.notifier.name(),
            "Monitoring started"
        );
        if let Err(e) = self.notifier.notify_started(self.config.timeframe).await {
            warn!(error = %e, "Started notification not delivered");
        }
        true
    }

    /// Run one pass and publish its report.
    pub async fn run_once(&mut self) -> PassReport {
        let span = info_span!("pass", number = self.passes + 1);
        let report = self.pass().instrument(span).await;
        self.reports.send_replace(Some(report.clone()));
        report
    }

    /// Announce start, then run passes back to back with the configured
    /// sleep in between until `shutdown` turns true or its sender drops.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        self.announce_start().await;

        loop {
            if *shutdown.borrow() {
                break;
            }

            self.run_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.refresh_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(passes = self.passes, "Monitoring stopped");
    }

    async fn pass(&mut self) -> PassReport {
        self.passes += 1;
        let started_at = Utc::now();

        let evaluated = join_all(self.config.symbols.iter().map(|s| self.evaluate(s))).await;

        let mut records = Vec::with_capacity(evaluated.len());
        for mut record in evaluated {
            let observation = self.tracker.observe(&record.symbol, record.signal);
            if observation.notify {
                record.notified = true;
                self.send_signal(&record).await;
            }
            records.push(record);
        }

        let critical_failure = records.iter().all(|r| !r.fetched);
        let report = PassReport {
            pass: self.passes,
            timeframe: self.config.timeframe,
            started_at,
            finished_at: Utc::now(),
            records,
            critical_failure,
            next_refresh_in: self.config.refresh_interval,
        };

        if critical_failure {
            error!(
                symbols = report.records.len(),
                "Could not fetch data for any instrument; waiting for next refresh"
            );
        } else {
            info!(
                fetched = report.records.len() - report.failed_count(),
                failed = report.failed_count(),
                notified = report.notified_count(),
                "Pass complete"
            );
            if let Err(e) = self
                .notifier
                .notify_heartbeat(report.finished_at, self.config.refresh_interval)
                .await
            {
                warn!(error = %e, "Heartbeat not delivered");
            }
        }

        report
    }

    async fn evaluate(&self, symbol: &str) -> InstrumentReport {
        let fetch = self
            .cache
            .get(symbol, self.config.timeframe, self.config.candle_limit);

        let series = match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(series)) => series,
            Ok(Err(e)) => {
                warn!(symbol, error = %e, "Fetch failed");
                return InstrumentReport::fetch_failed(symbol, &e);
            }
            Err(_) => {
                let e = DataError::Timeout {
                    secs: self.config.fetch_timeout.as_secs(),
                };
                warn!(symbol, error = %e, "Fetch failed");
                return InstrumentReport::fetch_failed(symbol, &e);
            }
        };

        match self.engine.compute(&series) {
            Ok(snapshot) => {
                let signal = self.classifier.classify(&snapshot);
                debug!(
                    symbol,
                    candles = series.len(),
                    price = snapshot.price,
                    rsi = ?snapshot.rsi,
                    %signal,
                    "Classified"
                );
                InstrumentReport {
                    symbol: symbol.to_string(),
                    price: Some(snapshot.price),
                    snapshot: Some(snapshot),
                    signal,
                    fetched: true,
                    notified: false,
                    error: None,
                }
            }
            Err(e) => {
                warn!(symbol, error = %e, "Indicator computation failed");
                InstrumentReport {
                    symbol: symbol.to_string(),
                    price: series.last().map(|c| c.close),
                    snapshot: None,
                    signal: SignalKind::Error,
                    fetched: true,
                    notified: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn send_signal(&self, record: &InstrumentReport) {
        let Some(price) = record.price else {
            return;
        };

        info!(symbol = %record.symbol, signal = %record.signal, price, "New trade signal");
        if let Err(e) = self
            .notifier
            .notify_signal(&record.symbol, record.signal, price, self.config.timeframe)
            .await
        {
            warn!(symbol = %record.symbol, error = %e, "Signal notification not delivered");
        }
    }
}
