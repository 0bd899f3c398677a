use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use super::deserialize_string_lax;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8788`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Env: `DATABASE_URL`. Default: `sqlite://reminders.db`.
    #[serde(default)]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Shared secret the cron scheduler presents when triggering a dispatch (required, non-empty).
    /// TOML: `basic.cron_secret`. Env: `CRON_SECRET`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub cron_secret: String,

    /// Timezone used to render `remind_time` inside notification text.
    /// TOML: `basic.display_timezone`. Default: `UTC`.
    #[serde(default = "default_display_timezone")]
    pub display_timezone: Tz,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://reminders.db".to_string(),
            loglevel: "info".to_string(),
            // No insecure default. `Config::load()` enforces non-empty.
            cron_secret: String::new(),
            display_timezone: default_display_timezone(),
        }
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8788
}

fn default_display_timezone() -> Tz {
    Tz::UTC
}
