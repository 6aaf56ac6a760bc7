//! Per-request middleware
//!
//! `teardown` runs after every request, matched or not: it closes the
//! storage unit of work and logs one line describing the exchange.
//! `json_method_not_allowed` gives the router's empty 405 the JSON error
//! body every other error carries.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::{ApiError, ApiHandler};
use crate::observability::{log_event_with_fields, Event};

pub async fn teardown(
    State(handler): State<ApiHandler>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    if let Err(e) = handler.storage().close() {
        log_event_with_fields(
            Event::StorageCloseFailed,
            &[("code", e.code().code()), ("message", e.message())],
        );
    }

    let status = response.status().as_u16().to_string();
    let elapsed_ms = started.elapsed().as_millis().to_string();
    log_event_with_fields(
        Event::RequestServed,
        &[
            ("elapsed_ms", &elapsed_ms),
            ("method", &method),
            ("path", &path),
            ("status", &status),
        ],
    );

    response
}

pub async fn json_method_not_allowed(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut json = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        json.headers_mut().insert(header::ALLOW, allow);
    }
    json
}
