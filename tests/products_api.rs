//! End-to-end dispatch tests for the product endpoints.

use std::collections::HashSet;

use products_api::http::error::INTERNAL_ERROR_MESSAGE;
use products_api::http::Event;
use products_api::products::handlers::INVALID_PRODUCT_MESSAGE;
use products_api::routing::{RouteError, Router};
use serde_json::json;

mod common;

use common::{body_json, call};

#[test]
fn test_list_products() {
    let envelope = call("GET", "/products", None);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.headers["Content-Type"], "application/json");

    let body = body_json(&envelope);
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 3);
    for product in products {
        assert!(product.get("id").is_some());
        assert!(product.get("name").is_some());
        assert!(product.get("price").is_some());
    }
    assert_eq!(products[0]["id"], "prod1");
    assert_eq!(products[2]["id"], "prod3");
}

#[test]
fn test_get_product() {
    let envelope = call("GET", "/products/prod1", None);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(
        body_json(&envelope),
        json!({ "id": "prod1", "name": "Laptop", "price": 1200 })
    );
}

#[test]
fn test_get_unknown_product() {
    let envelope = call("GET", "/products/doesnotexist", None);
    assert_eq!(envelope.status_code, 404);
    let message = body_json(&envelope)["message"].as_str().unwrap().to_string();
    assert!(message.contains("doesnotexist"));
    assert_eq!(message, "Product with ID 'doesnotexist' not found.");
}

#[test]
fn test_gateway_event_with_path_parameters() {
    let raw = r#"{
        "httpMethod": "GET",
        "path": "/products/prod1",
        "pathParameters": {"product_id": "prod1"},
        "requestContext": {"elb": {"targetGroupArn": "xxx"}},
        "headers": {},
        "body": null
    }"#;
    let event: Event = serde_json::from_str(raw).unwrap();
    let envelope = common::dispatcher().dispatch(event);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(body_json(&envelope)["name"], "Laptop");
}

#[test]
fn test_create_product() {
    let envelope = call("POST", "/products", Some(r#"{"name":"Monitor","price":300}"#));
    assert_eq!(envelope.status_code, 201);

    let body = body_json(&envelope);
    assert_eq!(body["message"], "Product created successfully");
    assert_eq!(body["product"]["name"], "Monitor");
    assert_eq!(body["product"]["price"], 300);

    let id = body["product"]["id"].as_str().unwrap();
    assert!(id.starts_with("prod_"));
    assert!(!["prod1", "prod2", "prod3"].contains(&id));
}

#[test]
fn test_created_ids_are_unique() {
    let dispatcher = common::dispatcher();
    let ids: HashSet<String> = (0..20)
        .map(|_| {
            let event = Event::new("POST", "/products").with_body(r#"{"name":"Pen","price":2.5}"#);
            let envelope = dispatcher.dispatch(event);
            body_json(&envelope)["product"]["id"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_create_product_missing_name() {
    let envelope = call("POST", "/products", Some(r#"{"price":300}"#));
    assert_eq!(envelope.status_code, 400);
    assert_eq!(body_json(&envelope), json!({ "message": INVALID_PRODUCT_MESSAGE }));
}

#[test]
fn test_create_product_unparsable_body() {
    let envelope = call("POST", "/products", Some("{\"name\": \"Monitor\", "));
    assert_eq!(envelope.status_code, 400);
    let message = body_json(&envelope)["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("Invalid JSON body"));
    assert_ne!(message, INTERNAL_ERROR_MESSAGE);
}

#[test]
fn test_create_product_non_object_body() {
    let envelope = call("POST", "/products", Some("[1, 2, 3]"));
    assert_eq!(envelope.status_code, 400);
}

#[test]
fn test_create_product_empty_body() {
    let envelope = call("POST", "/products", None);
    assert_eq!(envelope.status_code, 400);
    assert_eq!(body_json(&envelope)["message"], INVALID_PRODUCT_MESSAGE);
}

#[test]
fn test_unknown_route_and_wrong_method() {
    let envelope = call("GET", "/orders", None);
    assert_eq!(envelope.status_code, 404);
    assert!(body_json(&envelope)["message"].is_string());

    let envelope = call("DELETE", "/products/prod1", None);
    assert_eq!(envelope.status_code, 404);
}

#[test]
fn test_duplicate_registration_fails() {
    let result = Router::builder()
        .get("/products", products_api::products::handlers::list_products)
        .and_then(|b| b.get("/products", products_api::products::handlers::list_products));
    assert!(matches!(result, Err(RouteError::Conflict { .. })));
}

#[test]
fn test_every_envelope_body_is_json() {
    let cases: [(&str, &str, Option<&str>); 6] = [
        ("GET", "/products", None),
        ("GET", "/products/prod2", None),
        ("GET", "/products/nope", None),
        ("POST", "/products", Some(r#"{"name":"Desk","price":150}"#)),
        ("POST", "/products", Some("not json")),
        ("PUT", "/", None),
    ];
    for (method, path, body) in cases {
        let envelope = call(method, path, body);
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&envelope.body);
        assert!(parsed.is_ok(), "{method} {path} produced non-JSON body");
        assert!(!envelope.is_base64_encoded);
    }
}
