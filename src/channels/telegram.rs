use reminder_relay_schema::{Platform, SendMessageRequest};
use url::Url;

use super::NotifyChannel;
use crate::utils::logging::debug_payload;

/// Bot API `sendMessage` channel. `api_base` must end with `/` when it carries a path prefix.
pub struct TelegramChannel {
    send_url: Url,
    chat_id: String,
}

impl TelegramChannel {
    pub fn new(api_base: &Url, bot_token: &str, chat_id: &str) -> Result<Self, url::ParseError> {
        // Leading `./` keeps the `:` in the token from being read as a URL scheme.
        let send_url = api_base.join(&format!("./bot{bot_token}/sendMessage"))?;
        Ok(Self {
            send_url,
            chat_id: chat_id.to_string(),
        })
    }
}

impl NotifyChannel for TelegramChannel {
    fn platform(&self) -> Platform {
        Platform::Telegram
    }

    fn build_request(
        &self,
        client: &reqwest::Client,
        text: &str,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let body = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };
        debug_payload("Sending Telegram message", &body);

        client.post(self.send_url.clone()).json(&body).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn build_request_targets_token_scoped_url() {
        let base = Url::parse("https://api.telegram.org").unwrap();
        let channel = TelegramChannel::new(&base, "123:ABC", "-100").unwrap();
        let req = channel
            .build_request(&reqwest::Client::new(), "hi")
            .expect("failed to build request");

        assert_eq!(req.method(), Method::POST);
        assert_eq!(
            req.url().as_str(),
            "https://api.telegram.org/bot123:ABC/sendMessage"
        );

        let body: serde_json::Value = serde_json::from_slice(
            req.body().and_then(|b| b.as_bytes()).expect("buffered body"),
        )
        .unwrap();
        assert_eq!(body, serde_json::json!({ "chat_id": "-100", "text": "hi" }));
    }
}
