pub mod message;
pub mod telegram;
pub mod wecom;

pub use message::{format_display_time, reminder_text};
pub use telegram::TelegramChannel;
pub use wecom::WecomChannel;

use reminder_relay_schema::{ChannelOutcome, Platform};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::ChannelsConfig;
use crate::error::RelayError;

/// Outbound notification transport. Implementations only shape the request; sending and
/// outcome recording are shared.
pub trait NotifyChannel: Send + Sync {
    fn platform(&self) -> Platform;

    fn build_request(
        &self,
        client: &reqwest::Client,
        text: &str,
    ) -> Result<reqwest::Request, reqwest::Error>;
}

/// The configured channels, in delivery order (Telegram, then WeCom).
pub struct ChannelSet {
    client: reqwest::Client,
    channels: Vec<Box<dyn NotifyChannel>>,
}

impl ChannelSet {
    pub fn new(client: reqwest::Client, channels: Vec<Box<dyn NotifyChannel>>) -> Self {
        Self { client, channels }
    }

    /// Builds every channel whose required settings are present; the rest are left out.
    pub fn from_config(cfg: &ChannelsConfig, client: reqwest::Client) -> Self {
        let mut channels: Vec<Box<dyn NotifyChannel>> = Vec::new();

        if let Some((token, chat_id)) = cfg.telegram.credentials() {
            match TelegramChannel::new(&cfg.telegram.api_base, token, chat_id) {
                Ok(channel) => channels.push(Box::new(channel)),
                Err(e) => error!(error = %e, "Telegram channel disabled: invalid send URL"),
            }
        }

        if let Some(url) = cfg.wecom.webhook_url.clone() {
            channels.push(Box::new(WecomChannel::new(url)));
        }

        let set = Self::new(client, channels);
        info!(channels = ?set.platforms(), "Notification channels configured");
        set
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.channels.iter().map(|c| c.platform()).collect()
    }

    /// Sends `text` to each channel in turn. Never fails: each attempt becomes one outcome.
    pub async fn deliver_all(&self, text: &str) -> Vec<ChannelOutcome> {
        let mut outcomes = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            outcomes.push(self.deliver(channel.as_ref(), text).await);
        }
        outcomes
    }

    async fn deliver(&self, channel: &dyn NotifyChannel, text: &str) -> ChannelOutcome {
        let platform = channel.platform();
        match self.try_deliver(channel, text).await {
            Ok((ok, body)) => {
                if ok {
                    info!(%platform, "Notification delivered");
                } else {
                    warn!(%platform, response = %body, "Notification rejected by upstream");
                }
                ChannelOutcome::answered(platform, ok, body)
            }
            Err(e) => {
                warn!(%platform, error = %e, "Notification delivery failed");
                ChannelOutcome::failed(platform, e.to_string())
            }
        }
    }

    async fn try_deliver(
        &self,
        channel: &dyn NotifyChannel,
        text: &str,
    ) -> Result<(bool, Value), RelayError> {
        let req = channel.build_request(&self.client, text)?;
        let resp = self.client.execute(req).await?;
        let ok = resp.status().is_success();
        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok((ok, body))
    }
}
