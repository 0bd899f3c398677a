mod basic;
mod channels;

pub use basic::BasicConfig;
pub use channels::{ChannelsConfig, HttpConfig, SchedulerConfig, TelegramConfig, WecomConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Application configuration managed by Figment.
///
/// Loaded once at startup and handed to the router state; nothing reads the environment after
/// that.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Notification channels (see `channels.telegram` / `channels.wecom`).
    #[serde(default)]
    pub channels: ChannelsConfig,

    /// External cron scheduler used for job cleanup (see `scheduler` table).
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Outbound HTTP client settings (see `http` table).
    #[serde(default)]
    pub http: HttpConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// String settings read verbatim from the environment, as `(legacy flat name, table key)`.
///
/// Figment's `Env` provider parses values (`007123` becomes the integer `7123`), which would
/// silently rewrite secrets and chat ids. These keys bypass it.
const RAW_ENV_KEYS: [(&str, &str); 6] = [
    ("CRON_SECRET", "basic.cron_secret"),
    ("DATABASE_URL", "basic.database_url"),
    ("TG_BOT_TOKEN", "channels.telegram.bot_token"),
    ("TG_CHAT_ID", "channels.telegram.chat_id"),
    ("WECOM_KEY", "channels.wecom.webhook_url"),
    ("CRONJOB_API_KEY", "scheduler.api_key"),
];

const RELAY_ENV_PREFIX: &str = "RELAY_";

/// `basic.cron_secret` -> `RELAY_BASIC__CRON_SECRET`.
fn relay_env_name(key: &str) -> String {
    format!(
        "{RELAY_ENV_PREFIX}{}",
        key.replace('.', "__").to_ascii_uppercase()
    )
}

/// Whether a `RELAY_`-stripped env key (`basic__cron_secret`) is one of [`RAW_ENV_KEYS`].
fn is_raw_env_key(stripped: &str) -> bool {
    RAW_ENV_KEYS
        .iter()
        .any(|(_, key)| key.replace('.', "__").eq_ignore_ascii_case(stripped))
}

/// Layer holding the [`RAW_ENV_KEYS`] values as plain strings. For each key the legacy flat
/// name is applied first and its `RELAY_` form overrides it.
fn raw_env_layer<F>(lookup: F) -> Figment
where
    F: Fn(&str) -> Option<String>,
{
    let mut figment = Figment::new();
    for (legacy, key) in RAW_ENV_KEYS {
        for name in [legacy.to_string(), relay_env_name(key)] {
            if let Some(value) = lookup(&name) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
    }
    figment
}

impl Config {
    /// Builds a Figment that merges, in order: defaults, `config.toml` (if present), then the
    /// environment. String settings come from their legacy flat names or `RELAY_` forms taken
    /// verbatim; everything else from typed `RELAY_`-prefixed vars (`RELAY_BASIC__LISTEN_PORT=9000`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }

        figment
            .merge(
                Env::prefixed(RELAY_ENV_PREFIX)
                    .filter(|key| !is_raw_env_key(key.as_str()))
                    .split("__"),
            )
            .merge(raw_env_layer(|name| std::env::var(name).ok()))
    }

    /// Loads the layered configuration and validates required fields.
    pub fn load() -> Self {
        let cfg: Self = Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"));
        if cfg.basic.cron_secret.trim().is_empty() {
            panic!("basic.cron_secret (or CRON_SECRET) must be set and non-empty");
        }
        cfg
    }
}

/// Accepts strings and numbers; `config.toml` may carry secrets and chat ids unquoted.
pub(crate) fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or a number")),
    }
}

/// Optional variant of [`deserialize_string_lax`]; blank strings count as unset.
pub(crate) fn deserialize_opt_string_lax<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a string or a number")),
    }
}
