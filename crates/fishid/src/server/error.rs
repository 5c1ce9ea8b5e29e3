//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fishid_core::ValidationError;

/// Errors surfaced to HTTP clients as `{"error": message}`.
///
/// Only request problems end up here. Model failures never do: they degrade
/// into a placeholder record with a 200 status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            ValidationError::UnsupportedType { .. } => {
                ApiError::BadRequest("Only JPEG or PNG images are allowed".to_string())
            }
            ValidationError::Empty | ValidationError::MissingFile => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
        };

        tracing::warn!(status = status.as_u16(), "Rejected request: {message}");

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_client_statuses() {
        let resp = ApiError::from(ValidationError::UnsupportedType {
            content_type: "text/plain".to_string(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::from(ValidationError::TooLarge {
            size_bytes: 20 * 1024 * 1024,
            max_mb: 10,
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let resp = ApiError::from(ValidationError::MissingFile).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
