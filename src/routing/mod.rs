//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming event (method, path)
//!     → router.rs (filter by method)
//!     → matcher.rs (match path template, bind params)
//!     → Return: RouteMatch or NotFound
//!
//! Route Compilation (at startup):
//!     (method, template, handler) triples
//!     → Parse templates into segments
//!     → Reject overlapping routes
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: at most one route can match a given request

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathTemplate, Segment};
pub use router::{Handler, Route, RouteError, RouteMatch, Router, RouterBuilder};
