//! Error types for the signal pipeline.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Candle source errors.
///
/// Every variant is recoverable: the affected instrument reports an error
/// signal for the current pass and is fetched again on the next one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Rate limited by upstream (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Fetch timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No data available for {0}")]
    NoDataAvailable(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Notification delivery errors.
///
/// These never reach the pipeline; callers log and drop them.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Delivery failed: {0}")]
    SendFailed(String),

    #[error("Webhook returned HTTP {0}")]
    Rejected(u16),

    #[error("Invalid notifier configuration: {0}")]
    InvalidConfig(String),
}
