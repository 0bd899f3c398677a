use crate::server::router::RelayState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde_json::json;
use std::convert::Infallible;
use subtle::ConstantTimeEq;
use thiserror::Error as ThisError;

fn extract_header_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// First value of `name` in a raw query string.
pub(crate) fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    })
}

/// The shared secret as presented by the caller, if any: the `key` query parameter first, then
/// `Authorization: Bearer`.
///
/// Extraction never rejects; whether a key is required depends on the route.
#[derive(Debug, Clone)]
pub struct PresentedKey(pub Option<String>);

impl FromRequestParts<RelayState> for PresentedKey {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &RelayState,
    ) -> Result<Self, Self::Rejection> {
        let token = query_param(parts.uri.query(), "key")
            .filter(|k| !k.is_empty())
            .or_else(|| extract_header_token(&parts.headers).filter(|k| !k.is_empty()));
        Ok(PresentedKey(token))
    }
}

/// Constant-time comparison of the presented key against the configured secret.
pub fn verify_key(presented: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match presented {
        Some(key) => {
            if !expected.is_empty() && bool::from(key.as_bytes().ct_eq(expected.as_bytes())) {
                Ok(())
            } else {
                Err(AuthError::InvalidKey)
            }
        }
        None => Err(AuthError::MissingKey),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum AuthError {
    #[error("Missing access key")]
    MissingKey,
    #[error("Invalid access key")]
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Unauthorized", "reason": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_key_matches_exact_secret_only() {
        assert_eq!(verify_key(Some("s3cret"), "s3cret"), Ok(()));
        assert_eq!(verify_key(Some("s3cre"), "s3cret"), Err(AuthError::InvalidKey));
        assert_eq!(verify_key(Some("s3cret "), "s3cret"), Err(AuthError::InvalidKey));
        assert_eq!(verify_key(None, "s3cret"), Err(AuthError::MissingKey));
    }

    #[test]
    fn empty_configured_secret_never_matches() {
        assert_eq!(verify_key(Some(""), ""), Err(AuthError::InvalidKey));
    }

    #[test]
    fn query_param_decodes_and_takes_first() {
        assert_eq!(
            query_param(Some("id=a%20b&key=k1&key=k2"), "key").as_deref(),
            Some("k1")
        );
        assert_eq!(query_param(Some("id=a%20b"), "id").as_deref(), Some("a b"));
        assert_eq!(query_param(Some("id=1"), "key"), None);
        assert_eq!(query_param(None, "key"), None);
    }
}
