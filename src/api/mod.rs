//! Resource API for hbnb
//!
//! The API layer is where all request rules live. It is independent of the
//! HTTP framework's routing: every operation takes already-extracted path
//! parameters and an optional parsed body, talks to an injected
//! [`Storage`](crate::storage::Storage), and returns an [`ApiResponse`] or
//! an [`ApiError`].
//!
//! # Validation order on create
//!
//! 1. Parent resolves (parent-scoped kinds), else 404
//! 2. Body is a non-empty JSON object, else 400 "Not a JSON"
//! 3. `user_id` present (Place, Review), else 400 "Missing user_id"
//! 4. `user_id` resolves to a User, else 404
//! 5. Remaining required fields present, else 400 "Missing <field>"
//!
//! Checks fail fast: the first failure ends the request.

mod errors;
mod handler;
mod request;
mod resolver;
mod response;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handler::{ApiHandler, UnknownFieldPolicy};
pub use request::{parse_json_body, Payload};
pub use resolver::Resolver;
pub use response::ApiResponse;
