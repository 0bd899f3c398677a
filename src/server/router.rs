use crate::channels::ChannelSet;
use crate::config::{Config, HttpConfig};
use crate::cronjob::CronJobClient;
use crate::db::ReminderStore;
use crate::server::access_log;
use crate::server::routes::{notify, reminders};
use crate::service::{NotificationDispatcher, ReminderDeleter};

use axum::{Router, http::StatusCode, middleware};
use std::{sync::Arc, time::Duration};

const RELAY_USER_AGENT: &str = concat!("reminder-relay/", env!("CARGO_PKG_VERSION"));

/// Shared outbound client: every channel and scheduler call is bounded by the configured
/// connect and total timeouts.
pub fn build_client(cfg: &HttpConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder()
        .user_agent(RELAY_USER_AGENT)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .timeout(Duration::from_secs(cfg.request_timeout_secs));

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        let proxy =
            reqwest::Proxy::all(proxy_url.as_str()).expect("invalid proxy url for reqwest client");
        builder = builder.proxy(proxy);
    }

    builder.build().expect("failed to build reqwest client")
}

#[derive(Clone)]
pub struct RelayState {
    pub dispatcher: Arc<NotificationDispatcher>,
    pub deleter: Arc<ReminderDeleter>,
    pub cron_secret: Arc<str>,
}

impl RelayState {
    pub fn new(cfg: &Config, store: Arc<dyn ReminderStore>) -> Self {
        let client = build_client(&cfg.http);
        let channels = Arc::new(ChannelSet::from_config(&cfg.channels, client.clone()));
        let cron = CronJobClient::new(&cfg.scheduler, client);

        let dispatcher = NotificationDispatcher::new(
            store.clone(),
            channels,
            cron.clone(),
            cfg.basic.display_timezone,
        );
        let deleter = ReminderDeleter::new(store, cron);

        Self {
            dispatcher: Arc::new(dispatcher),
            deleter: Arc::new(deleter),
            cron_secret: Arc::from(cfg.basic.cron_secret.as_str()),
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .merge(notify::router())
        .merge(reminders::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log::access_log))
}
