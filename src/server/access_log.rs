//! Per-request access log and `x-request-id` propagation.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use std::time::Instant;
use tracing::{error, info, warn};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const MAX_REQUEST_ID_LEN: usize = 128;

/// The caller's `x-request-id` when it is short printable ASCII, else a fresh one.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| {
            !v.is_empty()
                && v.len() <= MAX_REQUEST_ID_LEN
                && v.bytes().all(|b| b.is_ascii_graphic())
        })
        .map_or_else(fresh_request_id, str::to_string)
}

/// 96 random bits as 16 base64url chars.
fn fresh_request_id() -> String {
    let bytes: [u8; 12] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

pub async fn access_log(req: Request, next: Next) -> Response {
    let id = request_id(req.headers());
    let method = req.method().clone();
    let version = req.version();
    // Path only: the dispatch query string carries the shared secret.
    let path = req.uri().path().to_owned();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let started = Instant::now();

    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let code = status.as_u16();

    if status.is_server_error() {
        error!(request_id = %id, %method, ?version, %path, status = code, latency_ms, %user_agent, "Request failed");
    } else if status.is_client_error() {
        warn!(request_id = %id, %method, ?version, %path, status = code, latency_ms, %user_agent, "Request rejected");
    } else {
        info!(request_id = %id, %method, ?version, %path, status = code, latency_ms, %user_agent, "Request served");
    }

    resp
}
