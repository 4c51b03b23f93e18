//! MCP Proxy - thin HTTP pass-through to an MCP backend
//!
//! The chat front-end never talks to the backend directly. It calls this proxy,
//! which forwards the JSON body and folds every outcome into one envelope shape.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌──────────────────────────┐      ┌─────────────┐
//! │  Playground │──────│   MCP Proxy              │──────│ MCP Backend │
//! │  front-end  │ HTTP │                          │ HTTP │ (external)  │
//! └─────────────┘      │  1. Read JSON body       │      └─────────────┘
//!                      │  2. Forward to backend   │
//!                      │  3. Pass through or      │
//!                      │     normalize the error  │
//!                      └──────────────────────────┘
//! ```
//!
//! ## Routes
//!
//! ```text
//! POST   /api/mcp/activate          {config, sessionId}  -> envelope
//! POST   /api/mcp/query             {query, sessionId}   -> envelope
//! GET    /api/mcp/sessions                               -> envelope
//! DELETE /api/mcp/session/{id}                           -> envelope
//! GET    /health                                         -> envelope
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;

pub use config::{ProxyConfig, ProxyConfigBuilder};
pub use envelope::ResponseEnvelope;
pub use error::{ProxyError, ProxyResult};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared proxy state
pub struct ProxyState {
    pub http_client: reqwest::Client,
    pub config: ProxyConfig,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    /// Absolute backend URL for a route path
    pub fn backend_url(&self, path: &str) -> String {
        format!("{}{}", self.config.backend_url, path)
    }
}

/// MCP HTTP proxy
pub struct McpProxy {
    state: Arc<ProxyState>,
}

impl McpProxy {
    /// Create a new proxy
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        Ok(Self {
            state: Arc::new(ProxyState::new(config)?),
        })
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let router = routes::create_router(Arc::clone(&self.state)).layer(TraceLayer::new_for_http());

        if self.state.config.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.state.config.port))
    }

    /// Run the proxy
    pub async fn run(&self) -> ProxyResult<()> {
        let app = self.router();
        let addr = self.addr();

        tracing::info!("MCP Proxy listening on http://{}", addr);
        tracing::info!("Backend: {}", self.state.config.backend_url);
        tracing::info!("Endpoints:");
        tracing::info!("  POST   {}", routes::ACTIVATE_PATH);
        tracing::info!("  POST   {}", routes::QUERY_PATH);
        tracing::info!("  GET    {}", routes::SESSIONS_PATH);
        tracing::info!("  DELETE {}/:session_id", routes::SESSION_PATH);
        tracing::info!("  GET    {}", routes::HEALTH_PATH);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
