//! HTTP Surface Tests
//!
//! Drives the full service (routes, fallbacks, CORS, path normalization
//! and teardown middleware) in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use hbnb::api::ApiHandler;
use hbnb::http_server::{HttpServer, HttpServerConfig};
use hbnb::model::ResourceKind;
use hbnb::storage::{FileStorage, MemoryStorage, Storage};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn server() -> HttpServer {
    HttpServer::new(
        HttpServerConfig::default(),
        ApiHandler::new(Arc::new(MemoryStorage::new())),
    )
}

async fn send_raw(
    server: &HttpServer,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = server.service().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send(
    server: &HttpServer,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    match body {
        Some(body) => {
            send_raw(server, method, uri, Some("application/json"), &body.to_string()).await
        }
        None => send_raw(server, method, uri, None, "").await,
    }
}

/// Response headers of a GET carrying an `Origin` header
async fn headers_for_origin(server: &HttpServer, origin: &str) -> HeaderMap {
    let request = Request::builder()
        .uri("/api/v1/status")
        .header(ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    let response = server.service().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.headers().clone()
}

async fn create(server: &HttpServer, uri: &str, body: Value) -> String {
    let (status, json) = send(server, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {json}");
    json["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Service endpoints
// =============================================================================

#[tokio::test]
async fn test_status() {
    let (status, json) = send(&server(), Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "OK"}));
}

#[tokio::test]
async fn test_stats_lists_every_collection() {
    let s = server();
    create(&s, "/api/v1/states", json!({"name": "California"})).await;

    let (status, json) = send(&s, Method::GET, "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        ["amenities", "cities", "places", "reviews", "states", "users"]
    );
    assert_eq!(json["states"], 1);
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let (status, json) = send(&server(), Method::GET, "/api/v1/status/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
}

// =============================================================================
// Error contract
// =============================================================================

#[tokio::test]
async fn test_unknown_paths_are_json_not_found() {
    let s = server();
    for uri in ["/nowhere", "/api/v1/nowhere", "/api/v2/states", "/api/v1/states/x/places"] {
        let (status, json) = send(&s, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json, json!({"error": "Not found"}), "{uri}");
    }
}

#[tokio::test]
async fn test_missing_resource_is_json_not_found() {
    let s = server();
    for uri in ["/api/v1/states/ghost", "/api/v1/users/ghost", "/api/v1/reviews/ghost"] {
        let (status, json) = send(&s, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json, json!({"error": "Not found"}));
    }
}

#[tokio::test]
async fn test_empty_object_is_not_a_json() {
    let (status, json) = send(&server(), Method::POST, "/api/v1/states", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Not a JSON"}));
}

#[tokio::test]
async fn test_bodies_that_are_not_json() {
    let s = server();
    let cases = [
        (None, r#"{"name": "CA"}"#),
        (Some("text/plain"), r#"{"name": "CA"}"#),
        (Some("application/json"), "{name: CA"),
        (Some("application/json"), "[1, 2]"),
        (Some("application/json"), "null"),
    ];
    for (content_type, body) in cases {
        let (status, json) =
            send_raw(&s, Method::POST, "/api/v1/states", content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["error"], "Not a JSON", "{body}");
    }
}

#[tokio::test]
async fn test_missing_parent_wins_over_bad_body() {
    let (status, json) = send_raw(
        &server(),
        Method::POST,
        "/api/v1/states/ghost/cities",
        Some("application/json"),
        "not json",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_place_without_user_id() {
    let s = server();
    let state = create(&s, "/api/v1/states", json!({"name": "California"})).await;
    let city = create(&s, &format!("/api/v1/states/{state}/cities"), json!({"name": "SF"})).await;

    let (status, json) = send(
        &s,
        Method::POST,
        &format!("/api/v1/cities/{city}/places"),
        Some(json!({"name": "Loft"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Missing user_id"}));
}

// =============================================================================
// Resource lifecycle
// =============================================================================

#[tokio::test]
async fn test_create_state() {
    let (status, json) = send(
        &server(),
        Method::POST,
        "/api/v1/states",
        Some(json!({"name": "California"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "California");
    assert_eq!(json["__class__"], "State");
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn test_put_ignores_id() {
    let s = server();
    let id = create(&s, "/api/v1/amenities", json!({"name": "Wifi"})).await;

    let (status, json) = send(
        &s,
        Method::PUT,
        &format!("/api/v1/amenities/{id}"),
        Some(json!({"id": "other", "name": "Pool"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], json!(id));
    assert_eq!(json["name"], "Pool");

    let (status, _) = send(&s, Method::GET, "/api/v1/amenities/other", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get() {
    let s = server();
    let id = create(&s, "/api/v1/users", json!({"email": "a@b.c", "password": "pw"})).await;
    let uri = format!("/api/v1/users/{id}");

    let (status, json) = send(&s, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({}));

    let (status, _) = send(&s, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&s, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nested_walk_from_state_to_review() {
    let s = server();
    let user = create(&s, "/api/v1/users", json!({"email": "a@b.c", "password": "pw"})).await;
    let state = create(&s, "/api/v1/states", json!({"name": "California"})).await;
    let city = create(&s, &format!("/api/v1/states/{state}/cities"), json!({"name": "SF"})).await;
    let place = create(
        &s,
        &format!("/api/v1/cities/{city}/places"),
        json!({"name": "Loft", "user_id": user}),
    )
    .await;
    let review = create(
        &s,
        &format!("/api/v1/places/{place}/reviews"),
        json!({"text": "Great", "user_id": user}),
    )
    .await;

    let (status, cities) =
        send(&s, Method::GET, &format!("/api/v1/states/{state}/cities"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cities[0]["id"], json!(city));
    assert_eq!(cities[0]["state_id"], json!(state));

    let (_, places) = send(&s, Method::GET, &format!("/api/v1/cities/{city}/places"), None).await;
    assert_eq!(places.as_array().unwrap().len(), 1);

    let (_, reviews) =
        send(&s, Method::GET, &format!("/api/v1/places/{place}/reviews"), None).await;
    assert_eq!(reviews[0]["id"], json!(review));
    assert_eq!(reviews[0]["place_id"], json!(place));

    let (status, fetched) = send(&s, Method::GET, &format!("/api/v1/reviews/{review}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user_id"], json!(user));
}

#[tokio::test]
async fn test_put_without_body_is_not_a_json() {
    let s = server();
    let id = create(&s, "/api/v1/states", json!({"name": "California"})).await;
    let (status, json) = send(&s, Method::PUT, &format!("/api/v1/states/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Not a JSON");
}

// =============================================================================
// Method and path errors
// =============================================================================

#[tokio::test]
async fn test_unsupported_method_is_json() {
    let s = server();
    for (method, uri) in [
        (Method::PATCH, "/api/v1/states"),
        (Method::POST, "/api/v1/status"),
        (Method::POST, "/api/v1/stats"),
        (Method::POST, "/api/v1/users/some-id"),
    ] {
        let (status, json) = send(&s, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(json, json!({"error": "Method not allowed"}), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_unsupported_method_keeps_allow_header() {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/v1/states")
        .body(Body::empty())
        .unwrap();
    let response = server().service().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response.headers().get(ALLOW).unwrap().to_str().unwrap();
    assert!(allow.contains("GET"), "{allow}");
    assert!(allow.contains("POST"), "{allow}");
}

#[tokio::test]
async fn test_undecodable_id_is_json_not_found() {
    let s = server();
    for (method, uri) in [
        (Method::GET, "/api/v1/states/%FF"),
        (Method::DELETE, "/api/v1/places/%FF"),
        (Method::GET, "/api/v1/states/%FF/cities"),
    ] {
        let (status, json) = send(&s, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json, json!({"error": "Not found"}), "{uri}");
    }
}

// =============================================================================
// Storage failures
// =============================================================================

#[tokio::test]
async fn test_unwritable_storage_is_internal_error() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(
        FileStorage::open(dir.path().join("missing").join("file.json")).unwrap(),
    );
    let s = HttpServer::new(
        HttpServerConfig::default(),
        ApiHandler::new(storage.clone()),
    );

    let (status, json) = send(
        &s,
        Method::POST,
        "/api/v1/states",
        Some(json!({"name": "California"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Internal server error"}));
    assert_eq!(storage.count(ResourceKind::State).unwrap(), 0);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_listed_origin_only() {
    let s = HttpServer::new(
        HttpServerConfig {
            cors_origins: vec!["http://example.com".into()],
            ..Default::default()
        },
        ApiHandler::new(Arc::new(MemoryStorage::new())),
    );

    let headers = headers_for_origin(&s, "http://example.com").await;
    assert_eq!(
        headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://example.com"
    );

    let headers = headers_for_origin(&s, "http://evil.test").await;
    assert!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_cors_wildcard_allows_any_origin() {
    let s = HttpServer::new(
        HttpServerConfig {
            cors_origins: vec!["*".into()],
            ..Default::default()
        },
        ApiHandler::new(Arc::new(MemoryStorage::new())),
    );

    let headers = headers_for_origin(&s, "http://anywhere.test").await;
    assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
}
