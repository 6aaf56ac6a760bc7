//! # HTTP Server
//!
//! Combines the `/api/v1` routes with the JSON 404 fallback, JSON 405
//! bodies, CORS, trailing-slash normalization and per-request teardown.

use std::future::Future;
use std::io;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::{middleware, Router, ServiceExt};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::{ApiError, ApiHandler};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::config::HttpServerConfig;
use super::middleware::{json_method_not_allowed, teardown};
use super::routes::api_routes;

/// API version prefix
pub const API_PREFIX: &str = "/api/v1";

/// HTTP server for the resource API
pub struct HttpServer {
    config: HttpServerConfig,
    handler: ApiHandler,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, handler: ApiHandler) -> Self {
        Self { config, handler }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Routes, fallback and layers, without path normalization
    pub fn router(&self) -> Router {
        let api = api_routes(self.handler.clone()).layer(cors_layer(&self.config));

        Router::new()
            .nest(API_PREFIX, api)
            .fallback(not_found)
            .layer(middleware::from_fn(json_method_not_allowed))
            .layer(middleware::from_fn_with_state(self.handler.clone(), teardown))
    }

    /// The complete service: router behind trailing-slash trimming
    pub fn service(&self) -> NormalizePath<Router> {
        NormalizePathLayer::trim_trailing_slash().layer(self.router())
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then save storage one last time
    pub async fn start_with_shutdown<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        log_event_with_fields(Event::ServerListening, &[("addr", &addr)]);

        let app = self.service();
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(signal)
            .await?;

        match self.handler.storage().save() {
            Ok(()) => log_event(Event::StorageSaved),
            Err(e) => log_event_with_fields(
                Event::StorageSaveFailed,
                &[("code", e.code().code()), ("message", e.message())],
            ),
        }
        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log_event(Event::ShutdownStart);
    }
}
