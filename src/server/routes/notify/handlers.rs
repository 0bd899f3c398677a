use crate::error::RelayError;
use crate::server::guards::auth::{PresentedKey, query_param, verify_key};
use crate::server::router::RelayState;
use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reminder_relay_schema::{DispatchResponse, ProbeResponse};
use tracing::debug;

/// ANY /api/notify?key=..&id=..
///
/// - no `id`: health probe, 200 without auth or store access
/// - `id` with a wrong or missing key: 401 before the store is touched
/// - otherwise dispatches; channel failures stay inside a 200 body
pub(super) async fn notify_handler(
    State(state): State<RelayState>,
    PresentedKey(key): PresentedKey,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(reminder_id) = query_param(query.as_deref(), "id").filter(|id| !id.is_empty()) else {
        return Json(ProbeResponse::ok()).into_response();
    };

    if let Err(e) = verify_key(key.as_deref(), &state.cron_secret) {
        debug!(reminder_id = %reminder_id, reason = %e, "Rejected dispatch request");
        return RelayError::from(e).into_response();
    }

    match state.dispatcher.dispatch(&reminder_id).await {
        Ok(report) => Json(DispatchResponse {
            success: true,
            error: None,
            notifications: report.notifications,
        })
        .into_response(),
        Err(e @ RelayError::NotFound(_)) => e.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DispatchResponse {
                success: false,
                error: Some(e.to_string()),
                notifications: Vec::new(),
            }),
        )
            .into_response(),
    }
}
