use crate::server::router::RelayState;
use axum::{
    Router,
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
    },
    routing::delete,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub mod handlers;

pub fn router() -> Router<RelayState> {
    Router::new()
        .route(
            "/api/reminders/{id}",
            delete(handlers::delete_reminder)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        // Browser frontends call this endpoint cross-origin; every response carries the headers,
        // including 405s and errors.
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}
