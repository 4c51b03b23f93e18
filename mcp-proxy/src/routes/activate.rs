//! Configuration activation route

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::{failure_message_or, ACTIVATE_PATH};
use crate::envelope::{passthrough, ResponseEnvelope};
use crate::error::ProxyResult;
use crate::ProxyState;

const ACTIVATE_FAILURE: &str = "Failed to activate configuration";

/// Forward `{config, sessionId}` to the backend's activation endpoint.
///
/// Whatever the backend answers is passed through, error statuses included.
/// Only a failure to reach the backend or to read its body is rewritten into
/// a 500 envelope; an unreachable backend is reported with its URL.
pub async fn activate(State(state): State<Arc<ProxyState>>, body: Bytes) -> Response {
    match forward(&state, &body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Error activating MCP configuration");

            let message = failure_message_or(&state, &e, ACTIVATE_FAILURE);
            ResponseEnvelope::failure(500, message, ACTIVATE_PATH).into_response()
        }
    }
}

async fn forward(state: &ProxyState, body: &[u8]) -> ProxyResult<Response> {
    let payload: Value = serde_json::from_slice(body)?;

    let session_id = payload.get("sessionId").and_then(Value::as_str).unwrap_or_default();
    tracing::debug!(session_id = %session_id, "Forwarding activation");

    let response = state
        .http_client
        .post(state.backend_url(ACTIVATE_PATH))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let data: Value = response.json().await?;

    Ok(passthrough(data, status))
}
