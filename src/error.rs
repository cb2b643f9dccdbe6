use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::upstream::UpstreamError;

/// Unified error type for gateway API responses.
#[derive(Debug)]
pub enum GatewayError {
    BadRequest(String),
    NotFound(String),
    /// Upstream call failed. Carries only the generic message sent to the
    /// caller; the cause was already logged when the value was constructed.
    Upstream(String),
    Internal(String),
}

impl GatewayError {
    /// Convert an upstream failure into the generic server-error response,
    /// logging the full cause exactly once at this boundary.
    pub fn upstream(endpoint: &str, public_msg: &str, err: UpstreamError) -> Self {
        tracing::error!(%endpoint, error = %err, "upstream request failed");
        Self::Upstream(public_msg.to_string())
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::NotFound(msg) => write!(f, "not_found: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream_error: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_str) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        let cases = [
            (
                GatewayError::BadRequest("bad interval".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::NotFound("price not found".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                GatewayError::Upstream("failed to fetch ticker data".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GatewayError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
