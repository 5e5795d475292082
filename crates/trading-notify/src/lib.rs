//! Signal notifiers.
//!
//! - [`DiscordWebhook`] posts embeds to a Discord channel webhook
//! - [`NoopNotifier`] accepts everything and sends nothing

mod discord;
mod noop;

pub use discord::{DiscordConfig, DiscordWebhook, Embed, EmbedField, EmbedFooter, WebhookPayload};
pub use noop::NoopNotifier;
