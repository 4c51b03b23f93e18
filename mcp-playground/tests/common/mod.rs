//! Shared test doubles

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use mcp_playground::{
    ActivateRequest, ClientError, ClientResult, ConfigListener, ProxyClient, ProxyReply, QueryRequest,
};
use serde_json::json;

/// In-memory proxy client.
///
/// Scripted replies are consumed in order; when none are queued, activation
/// echoes the session id and queries echo the query text.
#[derive(Default)]
pub struct MockProxyClient {
    activate_replies: Mutex<VecDeque<ClientResult<ProxyReply>>>,
    query_replies: Mutex<VecDeque<ClientResult<ProxyReply>>>,
    sessions_reply: Mutex<Option<ProxyReply>>,
    pub activations: Mutex<Vec<ActivateRequest>>,
    pub queries: Mutex<Vec<QueryRequest>>,
    pub released: Mutex<Vec<String>>,
}

impl MockProxyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_activate(&self, reply: ClientResult<ProxyReply>) {
        self.activate_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_query(&self, reply: ClientResult<ProxyReply>) {
        self.query_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_sessions(&self, reply: ProxyReply) {
        *self.sessions_reply.lock().unwrap() = Some(reply);
    }

    pub fn activation_count(&self) -> usize {
        self.activations.lock().unwrap().len()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ProxyClient for MockProxyClient {
    async fn activate(&self, request: &ActivateRequest) -> ClientResult<ProxyReply> {
        self.activations.lock().unwrap().push(request.clone());
        self.activate_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(activated(&request.session_id)))
    }

    async fn query(&self, request: &QueryRequest) -> ClientResult<ProxyReply> {
        self.queries.lock().unwrap().push(request.clone());
        self.query_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(answered(&format!("echo: {}", request.query))))
    }

    async fn list_sessions(&self) -> ClientResult<ProxyReply> {
        Ok(self.sessions_reply.lock().unwrap().clone().unwrap_or_else(|| {
            ProxyReply::json(
                200,
                json!({
                    "status_code": 200,
                    "status": true,
                    "message": "Sessions retrieved successfully",
                    "path": "/api/mcp/sessions",
                    "data": {"sessions": [], "count": 0}
                }),
            )
        }))
    }

    async fn release_session(&self, session_id: &str) -> ClientResult<ProxyReply> {
        self.released.lock().unwrap().push(session_id.to_string());
        Ok(ProxyReply::json(
            200,
            json!({
                "status_code": 200,
                "status": true,
                "message": format!("Session {} cleared successfully", session_id),
                "path": format!("/api/mcp/session/{}", session_id),
                "data": {"message": format!("Session {} cleared", session_id)}
            }),
        ))
    }
}

/// Successful activation envelope
pub fn activated(session_id: &str) -> ProxyReply {
    ProxyReply::json(
        200,
        json!({
            "status_code": 200,
            "status": true,
            "message": "Configuration activated successfully!",
            "path": "/api/mcp/activate",
            "data": {
                "sessionId": session_id,
                "servers": ["mcp-server-firecrawl", "ragie"],
                "message": "Configuration activated successfully!"
            }
        }),
    )
}

/// Successful query envelope
pub fn answered(result: &str) -> ProxyReply {
    ProxyReply::json(
        200,
        json!({
            "status_code": 200,
            "status": true,
            "message": "Query executed successfully",
            "path": "/api/mcp/query",
            "data": {"result": result}
        }),
    )
}

/// Failure envelope
pub fn failed(status_code: u16, message: &str, path: &str) -> ProxyReply {
    ProxyReply::json(
        status_code,
        json!({
            "status_code": status_code,
            "status": false,
            "message": message,
            "path": path,
            "data": null
        }),
    )
}

/// A failure where no answer came back
pub fn transport_error(text: &str) -> ClientError {
    ClientError::Io(std::io::Error::new(std::io::ErrorKind::Other, text.to_string()))
}

/// Records what the sidebar reports
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub activated: Vec<String>,
    pub cleared: usize,
}

impl ConfigListener for RecordingListener {
    fn on_config_activated(&mut self, session_id: &str) {
        self.activated.push(session_id.to_string());
    }

    fn on_config_cleared(&mut self) {
        self.cleared += 1;
    }
}
