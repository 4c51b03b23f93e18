//! Standardized response envelope
//!
//! Every route answers with the same JSON shape, for success and failure:
//!
//! ```text
//! {
//!   "status_code": 200,
//!   "status": true,
//!   "message": "Query executed successfully",
//!   "path": "/api/mcp/query",
//!   "data": { "result": "..." }
//! }
//! ```
//!
//! Backend bodies are passed through as raw JSON so fields this crate does not
//! know about survive the round trip. `ResponseEnvelope` is only used for the
//! envelopes the proxy synthesizes itself and for typed reads on the client side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed `{status_code, status, message, path, data}` wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Mirrors the HTTP status; 500 for transport failures
    pub status_code: u16,
    /// True iff the operation succeeded
    pub status: bool,
    pub message: String,
    pub path: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Successful envelope carrying `data`
    pub fn success(message: impl Into<String>, path: impl Into<String>, data: Value) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: true,
            message: message.into(),
            path: path.into(),
            data: Some(data),
        }
    }

    /// Failure envelope; `data` is always null
    pub fn failure(status_code: u16, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status_code,
            status: false,
            message: message.into(),
            path: path.into(),
            data: None,
        }
    }

    /// HTTP status to answer with, falling back to 500 for out-of-range codes
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}

/// Status to use when passing a backend body through.
///
/// The body's own `status_code` wins when it is a valid HTTP status, otherwise
/// the status the backend answered with is kept.
pub fn passthrough_status(body: &Value, upstream: StatusCode) -> StatusCode {
    body.get("status_code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .filter(|code| *code != 0)
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(upstream)
}

/// Pass a backend JSON body through unchanged
pub fn passthrough(body: Value, upstream: StatusCode) -> Response {
    let status = passthrough_status(&body, upstream);
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_null_data() {
        let envelope = ResponseEnvelope::failure(503, "overloaded", "/api/mcp/query");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "status_code": 503,
                "status": false,
                "message": "overloaded",
                "path": "/api/mcp/query",
                "data": null,
            })
        );
    }

    #[test]
    fn test_passthrough_status_prefers_body_code() {
        let body = json!({"status_code": 404, "status": false});
        assert_eq!(passthrough_status(&body, StatusCode::OK), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_passthrough_status_falls_back_to_upstream() {
        assert_eq!(
            passthrough_status(&json!({"status": true}), StatusCode::ACCEPTED),
            StatusCode::ACCEPTED
        );
        assert_eq!(
            passthrough_status(&json!({"status_code": 0}), StatusCode::OK),
            StatusCode::OK
        );
        assert_eq!(
            passthrough_status(&json!({"status_code": 70000}), StatusCode::BAD_GATEWAY),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_out_of_range_code_maps_to_500() {
        let envelope = ResponseEnvelope::failure(42, "weird", "/x");
        assert_eq!(envelope.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
