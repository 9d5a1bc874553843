//! Gateway error taxonomy — every failure maps to one HTTP status
//!
//! No recovery or retry anywhere; each request fully succeeds or surfaces
//! one of these as a descriptive JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors a gateway handler can return to the caller
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required backend configuration (URL/key) is absent → 500
    #[error("Missing {0} config")]
    MissingConfig(&'static str),

    /// Downstream call failed: non-2xx status, network error, timeout → 502
    #[error("{backend} call failed: {message}")]
    BackendCall { backend: String, message: String },

    /// Malformed request body or parameters → 400
    #[error("{0}")]
    BadRequest(String),

    /// Unrecognized A2A method name → 404
    #[error("Method not found")]
    MethodNotFound,
}

impl ApiError {
    /// Wrap an adapter failure, preserving the underlying message
    pub fn backend_call(backend: &str, err: anyhow::Error) -> Self {
        Self::BackendCall {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendCall { .. } => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.to_string()});
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MissingConfig("Gradient").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BackendCall {
                backend: "gradient".to_string(),
                message: "timed out".to_string(),
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::BadRequest("No text part found".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MethodNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_messages_are_descriptive() {
        assert_eq!(
            ApiError::MissingConfig("Gradient").to_string(),
            "Missing Gradient config"
        );
        let err = ApiError::BackendCall {
            backend: "gradient".to_string(),
            message: "status 503".to_string(),
        };
        assert_eq!(err.to_string(), "gradient call failed: status 503");
    }
}
