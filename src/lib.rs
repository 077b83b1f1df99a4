//! Products API: request routing, dispatch and error translation for
//! HTTP-style events.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod products;
pub mod routing;

pub use config::ServiceConfig;
pub use http::{Dispatcher, Event, HttpServer, ResponseEnvelope};
pub use routing::Router;
