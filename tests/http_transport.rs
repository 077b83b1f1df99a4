//! Tests for the axum transport adapter, driven in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use products_api::config::ServiceConfig;
use products_api::http::server::build_router;
use serde_json::Value;
use tower::ServiceExt;

mod common;

fn app(config: &ServiceConfig) -> axum::Router {
    build_router(config, Arc::new(common::dispatcher()))
}

async fn send(
    config: &ServiceConfig,
    request: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app(config).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, headers, body)
}

#[tokio::test]
async fn test_get_product_over_http() {
    let request = Request::builder()
        .uri("/products/prod2")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&ServiceConfig::default(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(body["name"], "Mouse");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::builder()
        .uri("/products")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&ServiceConfig::default(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_create_product_over_http() {
    let request = Request::builder()
        .method("POST")
        .uri("/products?source=test")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Monitor","price":300}"#))
        .unwrap();
    let (status, _, body) = send(&ServiceConfig::default(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["name"], "Monitor");
    assert_eq!(body["product"]["price"], 300);
}

#[tokio::test]
async fn test_unknown_route_over_http() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/products/prod1")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&ServiceConfig::default(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No route found for PATCH /products/prod1");
}

#[tokio::test]
async fn test_oversized_body_is_bad_request() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_size = 8;

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(r#"{"name":"Monitor","price":300}"#))
        .unwrap();
    let (status, _, body) = send(&config, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_non_utf8_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(vec![0xff, 0xfe, 0xfd]))
        .unwrap();
    let (status, _, body) = send(&ServiceConfig::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body is not valid UTF-8");
}

#[tokio::test]
async fn test_stalled_body_times_out_with_json_envelope() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;

    let stalled = futures_util::stream::pending::<Result<axum::body::Bytes, std::io::Error>>();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from_stream(stalled))
        .unwrap();
    let (status, headers, body) = send(&config, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(
        body["message"],
        "Request body was not received within the timeout"
    );
}
