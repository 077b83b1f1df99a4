//! Shared utilities for integration tests.

use products_api::http::{Dispatcher, Event, ResponseEnvelope};
use products_api::products;
use serde_json::Value;

/// Dispatcher over the product routes.
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new("test", products::router().expect("product routes are valid"))
}

/// Dispatch a single event built from method, path and optional body.
#[allow(dead_code)]
pub fn call(method: &str, path: &str, body: Option<&str>) -> ResponseEnvelope {
    let mut event = Event::new(method, path);
    event.body = body.map(str::to_string);
    dispatcher().dispatch(event)
}

/// Parse the envelope body as JSON.
#[allow(dead_code)]
pub fn body_json(envelope: &ResponseEnvelope) -> Value {
    serde_json::from_str(&envelope.body).expect("envelope body is JSON")
}
