//! Response building.
//!
//! # Responsibilities
//! - Normalize a handler's success value into a status + payload
//! - Serialize the payload to JSON and fill the response envelope
//!
//! # Design Decisions
//! - Bare payloads default to 200
//! - Payloads are held as `serde_json::Value`, so envelope building cannot fail
//! - Every envelope carries `Content-Type: application/json`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::ApiError;

/// Result every handler returns.
pub type HandlerResult = Result<Reply, ApiError>;

/// A successful handler outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub payload: Value,
    pub status_code: u16,
}

impl Reply {
    /// Payload with the default 200 status.
    pub fn ok(payload: Value) -> Self {
        Self::with_status(payload, 200)
    }

    /// Payload with 201 Created.
    pub fn created(payload: Value) -> Self {
        Self::with_status(payload, 201)
    }

    pub fn with_status(payload: Value, status_code: u16) -> Self {
        Self {
            payload,
            status_code,
        }
    }
}

impl From<Value> for Reply {
    fn from(payload: Value) -> Self {
        Reply::ok(payload)
    }
}

impl From<(Value, u16)> for Reply {
    fn from((payload, status_code): (Value, u16)) -> Self {
        Reply::with_status(payload, status_code)
    }
}

/// Normalized response handed back to the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ResponseEnvelope {
    /// Build a JSON envelope.
    pub fn json(status_code: u16, payload: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code,
            headers,
            body: payload.to_string(),
            is_base64_encoded: false,
        }
    }

    pub fn from_reply(reply: Reply) -> Self {
        Self::json(reply.status_code, &reply.payload)
    }
}
