//! MCP Proxy Binary
//!
//! Forwards activation and query calls from the playground to the MCP backend.
//!
//! ## Usage
//!
//! ```bash
//! # BACKEND_URL is required
//! BACKEND_URL=http://localhost:8000 mcp-proxy
//!
//! # Custom port
//! BACKEND_URL=http://localhost:8000 MCP_PROXY_PORT=9000 mcp-proxy
//!
//! # Bound backend calls
//! BACKEND_URL=http://localhost:8000 MCP_PROXY_TIMEOUT_MS=60000 mcp-proxy
//! ```

use mcp_proxy::{McpProxy, ProxyConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_proxy=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration from environment; a missing backend is fatal
    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting MCP Proxy v{}", env!("CARGO_PKG_VERSION"));

    let proxy = McpProxy::new(config)?;
    proxy.run().await?;

    Ok(())
}
