//! Binance USDT-M futures candle source.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use trading_core::error::DataError;
use trading_core::traits::CandleSource;
use trading_core::types::{Candle, CandleSeries, Timeframe};

/// Binance futures REST configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// REST base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            // Alternate host; the primary is frequently blocked for cloud IPs
            base_url: "https://fapi2.binance.com".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Candle source backed by the `/fapi/v1/klines` endpoint.
pub struct BinanceFuturesSource {
    config: BinanceConfig,
    client: Client,
}

impl BinanceFuturesSource {
    /// Create a new source.
    pub fn new(config: BinanceConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn klines_url(&self) -> String {
        format!("{}/fapi/v1/klines", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> DataError {
        if err.is_timeout() {
            DataError::Timeout {
                secs: self.config.request_timeout.as_secs(),
            }
        } else {
            DataError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl CandleSource for BinanceFuturesSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, DataError> {
        debug!(symbol, interval = %timeframe, limit, "Fetching klines");

        let response = self
            .client
            .get(self.klines_url())
            .query(&[
                ("symbol", symbol.to_string()),
                ("interval", timeframe.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            warn!(symbol, status = status.as_u16(), "Klines request rejected");
            return Err(status_error(status, &body));
        }

        parse_klines(&body, symbol, timeframe)
    }

    fn name(&self) -> &str {
        "binance-futures"
    }
}

fn status_error(status: StatusCode, body: &str) -> DataError {
    match status {
        // 418 is Binance's escalation after ignoring 429s
        StatusCode::TOO_MANY_REQUESTS | StatusCode::IM_A_TEAPOT => DataError::RateLimited {
            status: status.as_u16(),
        },
        _ => DataError::Http {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        },
    }
}

/// Parse a klines payload.
///
/// Each row is an array whose first six elements are open time (ms), open,
/// high, low, close and volume; prices arrive as decimal strings.
pub fn parse_klines(
    body: &str,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<CandleSeries, DataError> {
    let rows: Vec<Vec<Value>> =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if rows.is_empty() {
        return Err(DataError::NoDataAvailable(symbol.to_string()));
    }

    let candles = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_row(row).map_err(|e| DataError::Parse(format!("row {i}: {e}"))))
        .collect::<Result<Vec<Candle>, DataError>>()?;

    Ok(CandleSeries::new(symbol, timeframe, candles))
}

fn parse_row(row: &[Value]) -> Result<Candle, String> {
    if row.len() < 6 {
        return Err(format!("expected at least 6 fields, got {}", row.len()));
    }

    let open_time = row[0]
        .as_i64()
        .ok_or_else(|| "open time is not an integer".to_string())?;

    Ok(Candle::new(
        open_time,
        number(&row[1], "open")?,
        number(&row[2], "high")?,
        number(&row[3], "low")?,
        number(&row[4], "close")?,
        number(&row[5], "volume")?,
    ))
}

fn number(value: &Value, field: &str) -> Result<f64, String> {
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| format!("{field} is not numeric: {s:?}")),
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("{field} out of range")),
        _ => Err(format!("{field} has unexpected type")),
    }
}
