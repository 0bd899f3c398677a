use mimalloc::MiMalloc;
use reminder_relay::config::Config;
use reminder_relay::db::ReminderStore;
use reminder_relay::server::router::{RelayState, relay_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        display_timezone = %cfg.basic.display_timezone,
        telegram = cfg.channels.telegram.credentials().is_some(),
        wecom = cfg.channels.wecom.webhook_url.is_some(),
        scheduler_cleanup = cfg.scheduler.api_key.is_some(),
        proxy = %cfg.http.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
    );

    let db = reminder_relay::db::spawn(&cfg.basic.database_url).await;
    let store: Arc<dyn ReminderStore> = Arc::new(db);

    let state = RelayState::new(&cfg, store);
    let app = relay_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Reminder relay listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed only disables that signal.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    info!(signal = received, "Shutdown requested, draining in-flight requests");
}
