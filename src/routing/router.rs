//! Route registration and lookup.
//!
//! # Responsibilities
//! - Register `(method, template, handler)` triples at startup
//! - Reject routes that could match the same concrete path
//! - Resolve an incoming `(method, path)` to a handler plus bound parameters
//!
//! # Design Decisions
//! - Built through `RouterBuilder`, frozen into an immutable `Router`
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over routes (acceptable for typical route counts)
//! - Wrong method and unknown path both resolve to `NotFound`

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use thiserror::Error;

use crate::http::error::ApiError;
use crate::http::request::RequestContext;
use crate::http::response::HandlerResult;
use crate::routing::matcher::{PathParams, PathTemplate};

/// Configuration errors raised while building the route table.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Template was the empty string.
    #[error("Route template is empty")]
    EmptyTemplate,

    /// Template does not start with `/`.
    #[error("Route template must start with '/': {0}")]
    MissingLeadingSlash(String),

    /// Template contains `//` or a trailing slash.
    #[error("Route template contains an empty segment: {0}")]
    EmptySegment(String),

    /// Segment is neither a literal nor a whole `{name}` parameter.
    #[error("Invalid segment '{segment}' in route template {template}")]
    InvalidSegment { template: String, segment: String },

    /// The same parameter name appears twice.
    #[error("Parameter '{name}' declared more than once in route template {template}")]
    DuplicateParam { template: String, name: String },

    /// Another route for the same method would match the same paths.
    #[error("Route {method} {template} conflicts with already registered {method} {existing}")]
    Conflict {
        method: Method,
        template: String,
        existing: String,
    },
}

/// Uniform contract implemented by every endpoint.
pub trait Handler: Send + Sync {
    fn call(&self, ctx: &RequestContext) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&RequestContext) -> HandlerResult + Send + Sync,
{
    fn call(&self, ctx: &RequestContext) -> HandlerResult {
        self(ctx)
    }
}

/// A registered route.
#[derive(Clone)]
pub struct Route {
    method: Method,
    template: PathTemplate,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a request against the route table.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Collects routes before the table is frozen.
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method` and `template`.
    ///
    /// Fails if the template is malformed or if an existing route for the same
    /// method could match any path this template matches.
    pub fn route<H>(
        mut self,
        method: Method,
        template: &str,
        handler: H,
    ) -> Result<Self, RouteError>
    where
        H: Handler + 'static,
    {
        let template = PathTemplate::parse(template)?;

        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| r.method == method && r.template.overlaps(&template))
        {
            return Err(RouteError::Conflict {
                method,
                template: template.as_str().to_string(),
                existing: existing.template.as_str().to_string(),
            });
        }

        tracing::debug!(method = %method, template = %template, "Route registered");
        self.routes.push(Route {
            method,
            template,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    pub fn get<H: Handler + 'static>(
        self,
        template: &str,
        handler: H,
    ) -> Result<Self, RouteError> {
        self.route(Method::GET, template, handler)
    }

    pub fn post<H: Handler + 'static>(
        self,
        template: &str,
        handler: H,
    ) -> Result<Self, RouteError> {
        self.route(Method::POST, template, handler)
    }

    /// Freeze the table.
    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}

/// Immutable route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request to its route and bound path parameters.
    pub fn resolve(&self, method: &str, path: &str) -> Result<RouteMatch<'_>, ApiError> {
        let not_found = || ApiError::NotFound(format!("No route found for {method} {path}"));

        let method = Method::from_bytes(method.as_bytes()).map_err(|_| not_found())?;

        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route
                    .template
                    .matches(path)
                    .map(|params| RouteMatch { route, params })
            })
            .ok_or_else(not_found)
    }
}
