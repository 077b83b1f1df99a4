//! Error translation.
//!
//! # Responsibilities
//! - Define the failures a handler (or the core) can signal
//! - Map each failure kind to exactly one HTTP status code
//! - Render failures as `{"message": ...}` envelopes
//!
//! # Design Decisions
//! - Only `BadRequest`, `NotFound` and `Internal` reach the client
//! - Unmodeled failures are logged and rendered with a fixed message
//! - This is the only place failure status codes are decided

use serde_json::json;
use thiserror::Error;

use crate::http::response::ResponseEnvelope;

/// Message returned for every unmodeled failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Boxed source of an unmodeled failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Closed set of failure categories translatable into responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

/// Failure returned by a handler or raised by the dispatch core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid client input.
    #[error("{0}")]
    BadRequest(String),

    /// No route matched, or the addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Handler-reported internal failure with a client-safe message.
    #[error("{0}")]
    Internal(String),

    /// Anything else. The detail is logged, never rendered.
    #[error("Unexpected failure: {0}")]
    Unexpected(#[source] BoxError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn unexpected(source: impl Into<BoxError>) -> Self {
        ApiError::Unexpected(source.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) => ErrorKind::BadRequest,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Internal(_) | ApiError::Unexpected(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show the client.
    pub fn client_message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
            ApiError::Unexpected(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Translate into the response envelope sent to the client.
    pub fn into_envelope(self) -> ResponseEnvelope {
        let kind = self.kind();
        match &self {
            ApiError::Unexpected(source) => {
                tracing::error!(error = %source, "Unhandled failure converted to internal error");
            }
            ApiError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal error");
            }
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                tracing::warn!(kind = ?kind, detail = %msg, "Request failed");
            }
        }

        ResponseEnvelope::json(kind.status_code(), &json!({ "message": self.client_message() }))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::unexpected(e)
    }
}
