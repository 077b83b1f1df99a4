//! HTTP-style event handling subsystem.
//!
//! # Data Flow
//! ```text
//! Transport (axum server / CLI)
//!     → event.rs (inbound event)
//!     → request.rs (request context, lazy JSON body)
//!     → dispatch.rs (route, invoke handler, catch failures)
//!     → response.rs / error.rs (success or failure envelope)
//!     → Transport
//! ```

pub mod dispatch;
pub mod error;
pub mod event;
pub mod request;
pub mod response;
pub mod server;

pub use dispatch::Dispatcher;
pub use error::{ApiError, ErrorKind};
pub use event::Event;
pub use request::RequestContext;
pub use response::{HandlerResult, Reply, ResponseEnvelope};
pub use server::HttpServer;
