//! # API Errors
//!
//! Every error leaves the service as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::storage::StorageError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Target, parent, or referenced resource does not exist
    #[error("Not found")]
    NotFound,

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Malformed or incomplete request body
    #[error("{0}")]
    BadRequest(String),

    /// Storage gateway failure
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn not_a_json() -> Self {
        ApiError::BadRequest("Not a JSON".to_string())
    }

    pub fn missing(field: &str) -> Self {
        ApiError::BadRequest(format!("Missing {}", field))
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(ref e) = self {
            log_event_with_fields(
                Event::RequestFailed,
                &[("code", e.code().code()), ("message", e.message())],
            );
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
