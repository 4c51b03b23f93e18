//! Chat query route

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::{failure_message, forward_normalized, QUERY_PATH};
use crate::envelope::ResponseEnvelope;
use crate::error::ProxyError;
use crate::ProxyState;

/// Forward `{query, sessionId}` to the backend's query endpoint.
///
/// Unlike activation, a non-2xx backend answer is rebuilt into an envelope
/// from the backend's `message`, and an unreachable backend is reported with
/// the configured backend URL.
pub async fn query(State(state): State<Arc<ProxyState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            let err = ProxyError::InvalidBody(e);
            tracing::error!(error = %err, "Error running query");
            return ResponseEnvelope::failure(500, failure_message(&state, &err), QUERY_PATH)
                .into_response();
        }
    };

    let session_id = payload.get("sessionId").and_then(Value::as_str).unwrap_or_default();
    tracing::debug!(session_id = %session_id, "Forwarding query");

    let request = state.http_client.post(state.backend_url(QUERY_PATH)).json(&payload);
    forward_normalized(&state, request, QUERY_PATH).await
}
