use crate::error::RelayError;
use crate::server::router::RelayState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use reminder_relay_schema::{DeleteReminderRequest, DeleteResponse};

/// DELETE /api/reminders/{id}
///
/// Body: `{"cronJobId": ...}` (optional; an empty body is accepted). The row deletion decides
/// the response; scheduler cleanup is best-effort.
pub(super) async fn delete_reminder(
    State(state): State<RelayState>,
    Path(reminder_id): Path<String>,
    body: Bytes,
) -> Result<Json<DeleteResponse>, RelayError> {
    let request = parse_delete_body(&body)?;

    state
        .deleter
        .delete(&reminder_id, request.cron_job_id.as_deref())
        .await?;

    Ok(Json(DeleteResponse {
        success: true,
        error: None,
    }))
}

/// OPTIONS /api/reminders/{id}
pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub(super) async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

fn parse_delete_body(body: &[u8]) -> Result<DeleteReminderRequest, RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DeleteReminderRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}
