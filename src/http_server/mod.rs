//! # HTTP Server Module
//!
//! Serves the resource API over axum.
//!
//! # Endpoints (prefix `/api/v1`)
//!
//! - `GET /status`, `GET /stats`
//! - `GET|POST /states`, `GET|PUT|DELETE /states/:id`
//! - `GET|POST /users`, `GET|PUT|DELETE /users/:id`
//! - `GET|POST /amenities`, `GET|PUT|DELETE /amenities/:id`
//! - `GET|POST /states/:id/cities`, `GET|PUT|DELETE /cities/:id`
//! - `GET|POST /cities/:id/places`, `GET|PUT|DELETE /places/:id`
//! - `GET|POST /places/:id/reviews`, `GET|PUT|DELETE /reviews/:id`
//!
//! Anything else answers 404 `{"error": "Not found"}`. A listed path
//! with an unlisted method answers 405 `{"error": "Method not allowed"}`.

mod config;
mod middleware;
mod routes;
mod server;

pub use config::HttpServerConfig;
pub use routes::api_routes;
pub use server::{HttpServer, API_PREFIX};
