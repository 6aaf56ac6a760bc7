//! `/api/v1` routes
//!
//! Thin adapters: extract path parameters and the raw body, hand them to
//! [`ApiHandler`], return its response. No rule lives here.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap},
    routing::get,
    Router,
};

use crate::api::{parse_json_body, ApiError, ApiHandler, ApiResponse, ApiResult, Payload};
use crate::model::ResourceKind;

/// Build the `/api/v1` router
pub fn api_routes(handler: ApiHandler) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/stats", get(stats_handler))
        // Top-level kinds
        .route("/states", get(list_states).post(create_state))
        .route("/states/:id", get(get_state).delete(delete_state).put(update_state))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).delete(delete_user).put(update_user))
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route(
            "/amenities/:id",
            get(get_amenity).delete(delete_amenity).put(update_amenity),
        )
        // Parent-scoped kinds
        .route("/states/:id/cities", get(list_cities).post(create_city))
        .route("/cities/:id", get(get_city).delete(delete_city).put(update_city))
        .route("/cities/:id/places", get(list_places).post(create_place))
        .route("/places/:id", get(get_place).delete(delete_place).put(update_place))
        .route("/places/:id/reviews", get(list_reviews).post(create_review))
        .route(
            "/reviews/:id",
            get(get_review).delete(delete_review).put(update_review),
        )
        .with_state(handler)
}

fn payload(headers: &HeaderMap, body: &Bytes) -> Option<Payload> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    parse_json_body(content_type, body)
}

/// An id segment that does not decode names no resource
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

async fn status_handler(State(handler): State<ApiHandler>) -> ApiResponse {
    handler.status()
}

async fn stats_handler(State(handler): State<ApiHandler>) -> ApiResult<ApiResponse> {
    handler.stats()
}

/// Generate the five handlers of one resource kind
macro_rules! resource_handlers {
    (@single $kind:expr, $get:ident, $delete:ident, $update:ident) => {
        async fn $get(
            State(handler): State<ApiHandler>,
            id: Result<Path<String>, PathRejection>,
        ) -> ApiResult<ApiResponse> {
            handler.get($kind, &path_id(id)?)
        }

        async fn $delete(
            State(handler): State<ApiHandler>,
            id: Result<Path<String>, PathRejection>,
        ) -> ApiResult<ApiResponse> {
            handler.delete($kind, &path_id(id)?)
        }

        async fn $update(
            State(handler): State<ApiHandler>,
            id: Result<Path<String>, PathRejection>,
            headers: HeaderMap,
            body: Bytes,
        ) -> ApiResult<ApiResponse> {
            handler.update($kind, &path_id(id)?, payload(&headers, &body))
        }
    };
    (scoped $kind:expr, $list:ident, $get:ident, $delete:ident, $create:ident, $update:ident) => {
        resource_handlers!(@single $kind, $get, $delete, $update);

        async fn $list(
            State(handler): State<ApiHandler>,
            parent_id: Result<Path<String>, PathRejection>,
        ) -> ApiResult<ApiResponse> {
            handler.list($kind, Some(&path_id(parent_id)?))
        }

        async fn $create(
            State(handler): State<ApiHandler>,
            parent_id: Result<Path<String>, PathRejection>,
            headers: HeaderMap,
            body: Bytes,
        ) -> ApiResult<ApiResponse> {
            handler.create($kind, Some(&path_id(parent_id)?), payload(&headers, &body))
        }
    };
    ($kind:expr, $list:ident, $get:ident, $delete:ident, $create:ident, $update:ident) => {
        resource_handlers!(@single $kind, $get, $delete, $update);

        async fn $list(State(handler): State<ApiHandler>) -> ApiResult<ApiResponse> {
            handler.list($kind, None)
        }

        async fn $create(
            State(handler): State<ApiHandler>,
            headers: HeaderMap,
            body: Bytes,
        ) -> ApiResult<ApiResponse> {
            handler.create($kind, None, payload(&headers, &body))
        }
    };
}

resource_handlers!(
    ResourceKind::State,
    list_states,
    get_state,
    delete_state,
    create_state,
    update_state
);
resource_handlers!(
    ResourceKind::User,
    list_users,
    get_user,
    delete_user,
    create_user,
    update_user
);
resource_handlers!(
    ResourceKind::Amenity,
    list_amenities,
    get_amenity,
    delete_amenity,
    create_amenity,
    update_amenity
);
resource_handlers!(
    scoped ResourceKind::City,
    list_cities,
    get_city,
    delete_city,
    create_city,
    update_city
);
resource_handlers!(
    scoped ResourceKind::Place,
    list_places,
    get_place,
    delete_place,
    create_place,
    update_place
);
resource_handlers!(
    scoped ResourceKind::Review,
    list_reviews,
    get_review,
    delete_review,
    create_review,
    update_review
);
