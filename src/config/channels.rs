use serde::{Deserialize, Serialize};
use url::Url;

use super::deserialize_opt_string_lax;

/// All notification channels. A channel is active only when all of its required values are set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub wecom: WecomConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    /// TOML: `channels.telegram.bot_token`. Env: `TG_BOT_TOKEN`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_opt_string_lax")]
    pub bot_token: Option<String>,

    /// Target chat (numeric id or `@channel`).
    /// TOML: `channels.telegram.chat_id`. Env: `TG_CHAT_ID`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_opt_string_lax")]
    pub chat_id: Option<String>,

    /// Bot API base URL.
    /// TOML: `channels.telegram.api_base`. Default: `https://api.telegram.org`.
    #[serde(default = "default_telegram_api_base")]
    pub api_base: Url,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: default_telegram_api_base(),
        }
    }
}

impl TelegramConfig {
    /// `(bot_token, chat_id)` when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat_id)) => Some((token, chat_id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WecomConfig {
    /// Full group-robot webhook URL (including its `key` query parameter).
    /// TOML: `channels.wecom.webhook_url`. Env: `WECOM_KEY`.
    #[serde(default)]
    pub webhook_url: Option<Url>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Bearer credential for the scheduler REST API. Cleanup is skipped when unset.
    /// TOML: `scheduler.api_key`. Env: `CRONJOB_API_KEY`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_opt_string_lax")]
    pub api_key: Option<String>,

    /// TOML: `scheduler.api_base`. Default: `https://api.cron-job.org`.
    #[serde(default = "default_scheduler_api_base")]
    pub api_base: Url,

    /// Extra attempts for job deletion after a transport error or 5xx.
    /// TOML: `scheduler.retry_max_times`. Default: `2`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_scheduler_api_base(),
            retry_max_times: default_retry_max_times(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Optional upstream HTTP proxy for all outbound calls.
    /// TOML: `http.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TOML: `http.connect_timeout_secs`. Default: `5`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound for a whole outbound request, body included.
    /// TOML: `http.request_timeout_secs`. Default: `15`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_telegram_api_base() -> Url {
    Url::parse("https://api.telegram.org").expect("valid Telegram API base URL")
}

fn default_scheduler_api_base() -> Url {
    Url::parse("https://api.cron-job.org").expect("valid cron-job.org API base URL")
}

fn default_retry_max_times() -> usize {
    2
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    15
}
