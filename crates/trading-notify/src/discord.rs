//! Discord webhook notifier.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use trading_core::error::NotificationError;
use trading_core::format::format_price;
use trading_core::traits::SignalNotifier;
use trading_core::types::{SignalKind, Timeframe};

const COLOR_BUY: u32 = 3_066_993;
const COLOR_STRONG_BUY: u32 = 5_763_719;
const COLOR_HEARTBEAT: u32 = 3_447_003;
const COLOR_STARTED: u32 = 5_763_719;

/// Discord webhook configuration.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub webhook_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl DiscordConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Webhook request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// One rich embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    /// Embed announcing an actionable signal.
    pub fn signal(symbol: &str, signal: SignalKind, price: f64, timeframe: Timeframe) -> Self {
        let color = match signal {
            SignalKind::StrongBuy => COLOR_STRONG_BUY,
            _ => COLOR_BUY,
        };

        Self {
            title: format!("🚀 New Trade Signal: {symbol} → {signal}"),
            description: format!(
                "A new **{signal}** signal on the **{}** timeframe.",
                timeframe.label()
            ),
            color,
            fields: vec![EmbedField {
                name: "Current Price".to_string(),
                value: format_price(price),
                inline: true,
            }],
            footer: None,
        }
    }

    /// Embed reporting a completed pass.
    pub fn heartbeat(completed_at: DateTime<Utc>, next_refresh_in: Duration) -> Self {
        Self {
            title: "STATUS: Bot is Running".to_string(),
            description: format!(
                "Data refresh completed at: `{}`",
                completed_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            color: COLOR_HEARTBEAT,
            fields: Vec::new(),
            footer: Some(EmbedFooter {
                text: format!(
                    "Next refresh in {} minutes.",
                    next_refresh_in.as_secs() / 60
                ),
            }),
        }
    }

    /// Embed announcing that monitoring began.
    pub fn started(timeframe: Timeframe, at: DateTime<Utc>) -> Self {
        Self {
            title: "✅ Bot Started Successfully".to_string(),
            description: format!(
                "Monitoring has begun on the **{}** timeframe.",
                timeframe.label()
            ),
            color: COLOR_STARTED,
            fields: Vec::new(),
            footer: Some(EmbedFooter {
                text: format!("Checked at {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            }),
        }
    }
}

/// Notifier posting embeds to a Discord webhook.
pub struct DiscordWebhook {
    config: DiscordConfig,
    client: Client,
}

impl DiscordWebhook {
    /// Create a webhook notifier.
    pub fn new(config: DiscordConfig) -> Result<Self, NotificationError> {
        if !config.webhook_url.starts_with("https://") && !config.webhook_url.starts_with("http://") {
            return Err(NotificationError::InvalidConfig(
                "Webhook URL must be an http(s) URL".into(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotificationError::InvalidConfig(e.to_string()))?;

        Ok(Self { config, client })
    }

    async fn post(&self, embed: Embed) -> Result<(), NotificationError> {
        let payload = WebhookPayload {
            embeds: vec![embed],
        };

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(title = %payload.embeds[0].title, "Discord notification sent");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "Discord webhook rejected notification");
            Err(NotificationError::Rejected(status.as_u16()))
        }
    }
}

#[async_trait]
impl SignalNotifier for DiscordWebhook {
    async fn notify_signal(
        &self,
        symbol: &str,
        signal: SignalKind,
        price: f64,
        timeframe: Timeframe,
    ) -> Result<(), NotificationError> {
        self.post(Embed::signal(symbol, signal, price, timeframe)).await
    }

    async fn notify_heartbeat(
        &self,
        completed_at: DateTime<Utc>,
        next_refresh_in: Duration,
    ) -> Result<(), NotificationError> {
        self.post(Embed::heartbeat(completed_at, next_refresh_in)).await
    }

    async fn notify_started(&self, timeframe: Timeframe) -> Result<(), NotificationError> {
        self.post(Embed::started(timeframe, Utc::now())).await
    }

    fn name(&self) -> &str {
        "discord"
    }
}
