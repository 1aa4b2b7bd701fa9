//! HTTP error responses.
//!
//! Backend failures keep their [`ApiError`] code in the envelope so the
//! HTTP client can rebuild the same variant on the other side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dx_api_types::{ApiError, Envelope};
use serde_json::json;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Backend(#[from] ApiError),

    /// The request itself was unusable (e.g. an unknown export format).
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// Status code for a backend failure.
pub fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ApiError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
        ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ApiError::Http { .. } | ApiError::Decode(_) | ApiError::Transport(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

// ---------------------------------------------------------------------------
// IntoResponse implementation
// ---------------------------------------------------------------------------

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        match self {
            BridgeError::Backend(err) => {
                let status = status_for(&err);
                tracing::debug!(code = err.code(), %status, "backend error: {err}");
                (status, Json(Envelope::<()>::failure(&err))).into_response()
            }
            // No code: the client reports it as a plain HTTP error.
            BridgeError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn not_found_response() {
        let response = BridgeError::from(ApiError::not_found("Actor")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Actor not found");
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn bad_request_has_no_code() {
        let response = BridgeError::BadRequest("unknown export format `gif`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json.get("code").is_none());
    }

    #[tokio::test]
    async fn upstream_http_status_is_in_the_body() {
        let err = ApiError::Http {
            status: 429,
            message: "rate limited".into(),
        };
        let response = BridgeError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "HTTP");
        assert_eq!(json["status"], 429);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status_for(&ApiError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&ApiError::Transient("Network error occurred".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_for(&ApiError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_for(&ApiError::Transport("refused".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
