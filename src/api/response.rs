//! Response type for API operations

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Status code plus JSON body of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    /// 200 with `body`
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// 201 with `body`
    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    /// 200 with `{}`
    pub fn empty() -> Self {
        Self::ok(json!({}))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
