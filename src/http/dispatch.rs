//! Single dispatch entry point.
//!
//! # Data Flow
//! ```text
//! Event
//!     → RequestContext::from_event
//!     → Router::resolve (NotFound if no route)
//!     → Handler::call
//!     → Ok(Reply)      → ResponseEnvelope::from_reply
//!     → Err(ApiError)  → ApiError::into_envelope
//! ```
//!
//! # Design Decisions
//! - The only catch point for unmodeled failures, including handler panics
//! - Synchronous: one event is processed start to finish on the calling thread
//! - Shared read-only across concurrent requests (route table never mutates)

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::http::error::ApiError;
use crate::http::event::Event;
use crate::http::request::RequestContext;
use crate::http::response::{HandlerResult, ResponseEnvelope};
use crate::observability::metrics;
use crate::routing::Router;

/// Route table plus the settings needed to dispatch events against it.
#[derive(Debug)]
pub struct Dispatcher {
    service: String,
    router: Router,
}

impl Dispatcher {
    pub fn new(service: impl Into<String>, router: Router) -> Self {
        Self {
            service: service.into(),
            router,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Process one event and produce its response envelope.
    pub fn dispatch(&self, event: Event) -> ResponseEnvelope {
        let start_time = Instant::now();
        let ctx = RequestContext::from_event(event);
        let method = ctx.method().to_string();

        let span = tracing::info_span!(
            "dispatch",
            service = %self.service,
            method = %method,
            path = %ctx.path(),
            request_id = ctx.header("x-request-id").unwrap_or("unknown")
        );
        let _guard = span.enter();

        let (route, outcome) = self.invoke(ctx);

        let envelope = match outcome {
            Ok(reply) => ResponseEnvelope::from_reply(reply),
            Err(err) => err.into_envelope(),
        };

        tracing::info!(
            route = route.as_deref().unwrap_or("none"),
            status = envelope.status_code,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Request dispatched"
        );
        metrics::record_request(
            &method,
            envelope.status_code,
            route.as_deref().unwrap_or("none"),
            start_time,
        );

        envelope
    }

    /// Resolve and run the handler, returning the matched template for labelling.
    fn invoke(&self, ctx: RequestContext) -> (Option<String>, HandlerResult) {
        let matched = match self.router.resolve(ctx.method(), ctx.path()) {
            Ok(m) => m,
            Err(err) => return (None, Err(err)),
        };

        let template = matched.route.template().as_str().to_string();
        let handler = matched.route.handler();
        let ctx = ctx.with_path_params(matched.params);

        tracing::debug!(route = %template, "Route matched");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.call(&ctx)))
            .unwrap_or_else(|payload| Err(ApiError::unexpected(panic_message(payload.as_ref()))));

        (Some(template), outcome)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}
