//! Backend session routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{forward_normalized, SESSIONS_PATH, SESSION_PATH};
use crate::ProxyState;

/// List the sessions the backend currently holds
pub async fn list_sessions(State(state): State<Arc<ProxyState>>) -> Response {
    let request = state.http_client.get(state.backend_url(SESSIONS_PATH));
    forward_normalized(&state, request, SESSIONS_PATH).await
}

/// Release a backend session and its MCP clients
pub async fn release_session(
    State(state): State<Arc<ProxyState>>,
    Path(session_id): Path<String>,
) -> Response {
    let path = format!("{}/{}", SESSION_PATH, session_id);
    let request = state.http_client.delete(session_url(&state, &session_id));
    forward_normalized(&state, request, &path).await
}

/// Backend URL for one session, with the id percent-encoded as a single segment
fn session_url(state: &ProxyState, session_id: &str) -> String {
    let base = state.backend_url(SESSION_PATH);
    match reqwest::Url::parse(&base) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push(session_id);
            }
            url.to_string()
        }
        Err(_) => format!("{}/{}", base, session_id),
    }
}
