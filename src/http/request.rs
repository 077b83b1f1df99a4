//! Per-request context handed to handlers.
//!
//! # Responsibilities
//! - Wrap one inbound event without transforming it
//! - Normalize header names to lowercase for case-insensitive lookup
//! - Parse the JSON body lazily, at most once per request
//! - Offer typed body parsing that fails with `BadRequest`
//!
//! # Design Decisions
//! - Owned by exactly one dispatch, never shared
//! - The parsed body is memoized in a `OnceCell` and read-only afterwards
//! - An empty or absent body parses as an empty JSON object

use std::cell::OnceCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::http::error::ApiError;
use crate::http::event::Event;
use crate::routing::PathParams;

/// Immutable view over one inbound event.
#[derive(Debug)]
pub struct RequestContext {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
    path_params: PathParams,
    body: Option<String>,
    json_body: OnceCell<Result<Value, String>>,
}

impl RequestContext {
    pub fn from_event(event: Event) -> Self {
        // Names differing only in case collapse to one entry; the name that sorts
        // first byte-wise wins.
        let mut raw_headers: Vec<_> = event.headers.unwrap_or_default().into_iter().collect();
        raw_headers.sort_by(|a, b| a.0.cmp(&b.0));

        let mut headers = HashMap::new();
        for (name, value) in raw_headers {
            headers.entry(name.to_ascii_lowercase()).or_insert(value);
        }

        Self {
            method: event.method,
            path: event.path,
            headers,
            query_params: event.query_string_parameters.unwrap_or_default(),
            path_params: event.path_parameters.unwrap_or_default(),
            body: event.body,
            json_body: OnceCell::new(),
        }
    }

    /// Attach the parameters bound by the router.
    ///
    /// Router-bound values take precedence over any supplied with the event.
    pub fn with_path_params(mut self, params: PathParams) -> Self {
        self.path_params.extend(params);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    pub fn raw_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The body parsed as JSON, computed on first call and cached.
    pub fn json_body(&self) -> Result<&Value, ApiError> {
        self.json_body
            .get_or_init(|| parse_json(self.body.as_deref()))
            .as_ref()
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
    }

    /// Deserialize the body into `T`.
    ///
    /// Malformed JSON keeps the message from [`json_body`](Self::json_body); a body that
    /// parses but does not fit `T` gets a generic message.
    pub fn parse_body<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let value = self.json_body()?;
        T::deserialize(value).map_err(|e| {
            tracing::debug!(error = %e, "Request body did not match expected shape");
            ApiError::bad_request("Request body does not match the expected shape")
        })
    }
}

fn parse_json(body: Option<&str>) -> Result<Value, String> {
    match body {
        None => Ok(Value::Object(Map::new())),
        Some(text) if text.trim().is_empty() => Ok(Value::Object(Map::new())),
        Some(text) => serde_json::from_str(text).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_headers_are_case_insensitive() {
        let ctx = RequestContext::from_event(
            Event::new("GET", "/products").with_header("X-Request-ID", "abc"),
        );
        assert_eq!(ctx.header("x-request-id"), Some("abc"));
        assert_eq!(ctx.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(ctx.header("missing"), None);
    }

    #[test]
    fn test_case_colliding_headers_resolve_deterministically() {
        for _ in 0..16 {
            let ctx = RequestContext::from_event(
                Event::new("GET", "/products")
                    .with_header("x-id", "lower")
                    .with_header("X-Id", "mixed")
                    .with_header("X-ID", "upper"),
            );
            assert_eq!(ctx.header("x-id"), Some("upper"));
            assert_eq!(ctx.headers().len(), 1);
        }
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let ctx = RequestContext::from_event(Event::new("POST", "/products"));
        assert_eq!(ctx.json_body().unwrap(), &json!({}));

        let ctx = RequestContext::from_event(Event::new("POST", "/products").with_body("  "));
        assert_eq!(ctx.json_body().unwrap(), &json!({}));
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let ctx =
            RequestContext::from_event(Event::new("POST", "/products").with_body("{not json"));
        let err = ctx.json_body().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_json_body_is_memoized() {
        let ctx = RequestContext::from_event(
            Event::new("POST", "/products").with_body(r#"{"name":"Monitor"}"#),
        );
        let first = ctx.json_body().unwrap() as *const Value;
        let second = ctx.json_body().unwrap() as *const Value;
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_body_typed() {
        #[derive(Debug, Deserialize)]
        struct Input {
            name: String,
        }

        let ctx = RequestContext::from_event(
            Event::new("POST", "/products").with_body(r#"{"name":"Monitor"}"#),
        );
        let input: Input = ctx.parse_body().unwrap();
        assert_eq!(input.name, "Monitor");

        let ctx = RequestContext::from_event(Event::new("POST", "/products").with_body("[1,2]"));
        let err = ctx.parse_body::<Input>().unwrap_err();
        assert_eq!(err.to_string(), "Request body does not match the expected shape");
    }

    #[test]
    fn test_router_params_override_event_params() {
        let mut event = Event::new("GET", "/products/prod2");
        event.path_parameters = Some(HashMap::from([
            ("product_id".to_string(), "stale".to_string()),
            ("extra".to_string(), "kept".to_string()),
        ]));

        let ctx = RequestContext::from_event(event).with_path_params(PathParams::from([(
            "product_id".to_string(),
            "prod2".to_string(),
        )]));
        assert_eq!(ctx.path_param("product_id"), Some("prod2"));
        assert_eq!(ctx.path_param("extra"), Some("kept"));
    }

    #[test]
    fn test_query_params() {
        let ctx =
            RequestContext::from_event(Event::new("GET", "/products").with_query("limit", "2"));
        assert_eq!(ctx.query_param("limit"), Some("2"));
        assert_eq!(ctx.query_params().len(), 1);
    }
}
