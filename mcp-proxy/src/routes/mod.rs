//! HTTP route handlers

mod activate;
mod query;
mod sessions;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};

use crate::envelope::{passthrough, ResponseEnvelope};
use crate::error::ProxyError;
use crate::ProxyState;

pub const ACTIVATE_PATH: &str = "/api/mcp/activate";
pub const QUERY_PATH: &str = "/api/mcp/query";
pub const SESSIONS_PATH: &str = "/api/mcp/sessions";
pub const SESSION_PATH: &str = "/api/mcp/session";
pub const HEALTH_PATH: &str = "/health";

/// Fallback when an error carries no text of its own
const GENERIC_FAILURE: &str = "Error processing request";

/// Create the router with all routes
pub fn create_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ACTIVATE_PATH, post(activate::activate))
        .route(QUERY_PATH, post(query::query))
        .route(SESSIONS_PATH, get(sessions::list_sessions))
        .route("/api/mcp/session/:session_id", delete(sessions::release_session))
        .with_state(state)
}

/// Health check
async fn health() -> ResponseEnvelope {
    ResponseEnvelope::success(
        "Service is healthy",
        HEALTH_PATH,
        json!({
            "service": "mcp-proxy",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Send a request to the backend and normalize the outcome.
///
/// 2xx bodies are passed through. Non-2xx answers become a failure envelope
/// with the backend's status and its `message`, and anything thrown on the
/// way becomes a 500.
pub(crate) async fn forward_normalized(
    state: &ProxyState,
    request: reqwest::RequestBuilder,
    path: &str,
) -> Response {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return failure_response(state, &ProxyError::Http(e), path),
    };

    let status = response.status();
    if !status.is_success() {
        let message = backend_error_message(response).await;
        tracing::warn!(path, status = status.as_u16(), message = %message, "Backend rejected request");
        return ResponseEnvelope::failure(status.as_u16(), message, path).into_response();
    }

    match response.json::<Value>().await {
        Ok(body) => passthrough(body, status),
        Err(e) => failure_response(state, &ProxyError::Http(e), path),
    }
}

/// Message from a non-2xx backend answer
pub(crate) async fn backend_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Backend returned {}", status.as_u16())),
        Err(_) => format!(
            "Backend error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string(),
    }
}

/// User-facing text for an error raised while handling a request
pub(crate) fn failure_message(state: &ProxyState, err: &ProxyError) -> String {
    failure_message_or(state, err, GENERIC_FAILURE)
}

/// Like [`failure_message`], with `fallback` for errors that carry no text
pub(crate) fn failure_message_or(state: &ProxyState, err: &ProxyError, fallback: &str) -> String {
    match err {
        ProxyError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request() => format!(
            "Cannot connect to backend at {}. Make sure the backend server is running.",
            state.config.backend_url
        ),
        other => {
            let message = other.to_string();
            if message.is_empty() {
                fallback.to_string()
            } else {
                message
            }
        }
    }
}

fn failure_response(state: &ProxyState, err: &ProxyError, path: &str) -> Response {
    tracing::error!(path, error = %err, "Error forwarding request");
    ResponseEnvelope::failure(500, failure_message(state, err), path).into_response()
}
