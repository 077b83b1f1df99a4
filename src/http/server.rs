//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback handler
//! - Wire up middleware (tracing, request ID)
//! - Bound the body read by the configured request timeout
//! - Convert each HTTP request into an `Event`
//! - Convert each `ResponseEnvelope` back into an HTTP response
//!
//! All routing decisions are made by the `Dispatcher`, not by Axum.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header::HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::dispatch::Dispatcher;
use crate::http::error::ApiError;
use crate::http::event::Event;
use crate::http::response::ResponseEnvelope;
use crate::lifecycle::signals::shutdown_signal;

/// Application state injected into the fallback handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

/// HTTP front end for the dispatcher.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let router = build_router(&config, dispatcher);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServiceConfig, dispatcher: Arc<Dispatcher>) -> Router {
    let state = AppState {
        dispatcher,
        max_body_size: config.limits.max_body_size,
        request_timeout: Duration::from_secs(config.timeouts.request_secs),
    };

    Router::new().fallback(event_handler).with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

async fn event_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    // Dispatch itself is synchronous, so the body read is the only step that can stall.
    let read = tokio::time::timeout(
        state.request_timeout,
        axum::body::to_bytes(body, state.max_body_size),
    )
    .await;

    let bytes = match read {
        Ok(Ok(bytes)) => bytes,
        Err(_) => {
            tracing::warn!(timeout = ?state.request_timeout, "Timed out reading request body");
            return envelope_response(
                ApiError::bad_request("Request body was not received within the timeout")
                    .into_envelope(),
            );
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to read request body");
            return envelope_response(
                ApiError::bad_request("Request body is unreadable or exceeds the size limit")
                    .into_envelope(),
            );
        }
    };

    let body = if bytes.is_empty() {
        None
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(_) => {
                return envelope_response(
                    ApiError::bad_request("Request body is not valid UTF-8").into_envelope(),
                );
            }
        }
    };

    let headers: HashMap<String, String> = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default();

    let event = Event {
        method: parts.method.as_str().to_string(),
        path: parts.uri.path().to_string(),
        headers: Some(headers),
        path_parameters: None,
        query_string_parameters: (!query.is_empty()).then_some(query),
        body,
    };

    envelope_response(state.dispatcher.dispatch(event))
}

/// Convert an envelope into an HTTP response.
fn envelope_response(envelope: ResponseEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, envelope.body).into_response();
    let headers = response.headers_mut();
    for (name, value) in &envelope.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header"),
        }
    }
    response
}
