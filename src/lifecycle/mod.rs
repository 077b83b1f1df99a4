//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Build routes → Bind listener
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → axum graceful shutdown → in-flight requests finish → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route table is built before the listener is bound

pub mod signals;
