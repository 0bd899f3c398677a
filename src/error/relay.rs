use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error as ThisError;

use super::IsRetryable;
use crate::server::guards::auth::AuthError;

#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("Reminder not found or already processed: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("Upstream rejected the request: {0}")]
    UpstreamRejected(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        match self {
            RelayError::Unauthorized(auth) => auth.into_response(),
            RelayError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),
            RelayError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "error": "Reminder not found or already processed",
                })),
            )
                .into_response(),
            // Internal failures surface their raw message; callers of this service are the
            // operator's own scheduler and frontend.
            other => (
                other.status_code(),
                Json(json!({ "success": false, "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}

impl IsRetryable for RelayError {
    fn is_retryable(&self) -> bool {
        match self {
            RelayError::ReqwestError(e) => e.is_connect() || e.is_timeout(),
            RelayError::UpstreamStatus(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn only_transient_upstream_failures_are_retryable() {
        assert!(RelayError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(RelayError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!RelayError::UpstreamStatus(StatusCode::NOT_FOUND).is_retryable());
        assert!(!RelayError::UpstreamRejected("nope".to_string()).is_retryable());
        assert!(!RelayError::NotFound("1".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn internal_errors_expose_raw_message() {
        let resp = RelayError::UnexpectedError("disk on fire".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "Unexpected error: disk on fire");
    }

    #[tokio::test]
    async fn auth_and_not_found_bodies() {
        let resp = RelayError::from(AuthError::InvalidKey).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            v,
            json!({ "success": false, "error": "Unauthorized", "reason": "Invalid access key" })
        );

        let resp = RelayError::NotFound("r-1".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            v,
            json!({ "success": false, "error": "Reminder not found or already processed" })
        );
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            RelayError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RelayError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::RactorError("gone".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
