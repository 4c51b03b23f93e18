//! Client for the MCP proxy routes

use async_trait::async_trait;
use mcp_proxy::routes::{ACTIVATE_PATH, QUERY_PATH, SESSIONS_PATH, SESSION_PATH};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Body of `POST /api/mcp/activate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateRequest {
    pub config: Value,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Body of `POST /api/mcp/query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Raw answer from the proxy.
///
/// The body is kept as loose JSON: success payloads may nest their fields
/// under `data` or put them at the top level, and error bodies may not be JSON
/// at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    /// HTTP status of the answer
    pub http_status: u16,

    /// Canonical reason phrase for the status, if any
    pub reason: Option<String>,

    /// Parsed JSON body, `None` when the body was not JSON
    pub body: Option<Value>,
}

impl ProxyReply {
    /// Reply with a JSON body
    pub fn json(http_status: u16, body: Value) -> Self {
        Self {
            http_status,
            reason: reqwest::StatusCode::from_u16(http_status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            body: Some(body),
        }
    }

    /// HTTP status is 2xx
    pub fn is_http_ok(&self) -> bool {
        (200..300).contains(&self.http_status)
    }

    /// HTTP status is 2xx and the envelope reports success
    pub fn is_success(&self) -> bool {
        self.is_http_ok()
            && self
                .body
                .as_ref()
                .and_then(|b| b.get("status"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }

    /// Non-empty envelope message
    pub fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Payload field, looked up under `data` first and then at the top level.
    /// Null and empty-string values count as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        let body = self.body.as_ref()?;
        let present = |v: &&Value| !v.is_null() && v.as_str() != Some("");
        body.get("data")
            .and_then(|data| data.get(key))
            .filter(present)
            .or_else(|| body.get(key).filter(present))
    }

    /// `"<code> <reason>"` for messages built from the status line
    pub fn status_line(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{} {}", self.http_status, reason),
            None => self.http_status.to_string(),
        }
    }
}

/// Proxy client interface
#[async_trait]
pub trait ProxyClient: Send + Sync {
    /// Activate an MCP configuration
    async fn activate(&self, request: &ActivateRequest) -> ClientResult<ProxyReply>;

    /// Run a chat query against an activated session
    async fn query(&self, request: &QueryRequest) -> ClientResult<ProxyReply>;

    /// List the backend's active sessions
    async fn list_sessions(&self) -> ClientResult<ProxyReply>;

    /// Release a backend session
    async fn release_session(&self, session_id: &str) -> ClientResult<ProxyReply>;
}

/// Client talking to a running `mcp-proxy` over HTTP
#[derive(Debug, Clone)]
pub struct HttpProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProxyClient {
    /// Create a client for the proxy at `base_url`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ClientResult<ProxyReply> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        Ok(ProxyReply {
            http_status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body: serde_json::from_slice(&bytes).ok(),
        })
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn activate(&self, request: &ActivateRequest) -> ClientResult<ProxyReply> {
        self.send(self.http.post(self.url(ACTIVATE_PATH)).json(request)).await
    }

    async fn query(&self, request: &QueryRequest) -> ClientResult<ProxyReply> {
        self.send(self.http.post(self.url(QUERY_PATH)).json(request)).await
    }

    async fn list_sessions(&self) -> ClientResult<ProxyReply> {
        self.send(self.http.get(self.url(SESSIONS_PATH))).await
    }

    async fn release_session(&self, session_id: &str) -> ClientResult<ProxyReply> {
        let mut url = reqwest::Url::parse(&self.url(SESSION_PATH))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(session_id);

        self.send(self.http.delete(url)).await
    }
}
