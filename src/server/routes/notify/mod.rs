use crate::server::router::RelayState;
use axum::{Router, routing::any};

pub mod handlers;

pub fn router() -> Router<RelayState> {
    // Method-agnostic: the scheduler may be configured with GET or POST.
    Router::new().route("/api/notify", any(handlers::notify_handler))
}
