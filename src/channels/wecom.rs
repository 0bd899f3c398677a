use reminder_relay_schema::{Platform, WecomTextMessage};
use url::Url;

use super::NotifyChannel;
use crate::utils::logging::debug_payload;

pub struct WecomChannel {
    webhook_url: Url,
}

impl WecomChannel {
    pub fn new(webhook_url: Url) -> Self {
        Self { webhook_url }
    }
}

impl NotifyChannel for WecomChannel {
    fn platform(&self) -> Platform {
        Platform::Wecom
    }

    fn build_request(
        &self,
        client: &reqwest::Client,
        text: &str,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let body = WecomTextMessage::new(text);
        debug_payload("Sending WeCom message", &body);

        client.post(self.webhook_url.clone()).json(&body).build()
    }
}
