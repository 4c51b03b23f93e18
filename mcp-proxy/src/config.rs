//! Proxy configuration
//!
//! Read once at startup and injected into [`ProxyState`](crate::ProxyState).
//! Every route uses the same backend location; a missing `BACKEND_URL` is a
//! startup error rather than a silent localhost default.

use crate::error::{ProxyError, ProxyResult};

/// Environment variable holding the backend base URL
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
/// Environment variable holding the listen port
pub const PORT_ENV: &str = "MCP_PROXY_PORT";
/// Environment variable holding the optional backend timeout
pub const TIMEOUT_ENV: &str = "MCP_PROXY_TIMEOUT_MS";
/// Environment variable toggling CORS
pub const CORS_ENV: &str = "MCP_PROXY_CORS";

const DEFAULT_PORT: u16 = 3000;

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Backend base URL, without trailing slash
    pub backend_url: String,
    /// Port to listen on
    pub port: u16,
    /// Backend request timeout; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
    /// Enable permissive CORS
    pub cors_enabled: bool,
}

impl ProxyConfig {
    /// Create a new configuration builder
    pub fn builder() -> ProxyConfigBuilder {
        ProxyConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> ProxyResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ProxyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL_ENV).ok_or(ProxyError::MissingEnv(BACKEND_URL_ENV))?;

        let mut builder = Self::builder().backend_url(backend_url);

        if let Some(port) = lookup(PORT_ENV) {
            let port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ProxyError::InvalidEnv { name: PORT_ENV, reason: e.to_string() }
            })?;
            builder = builder.port(port);
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let timeout = timeout.trim().parse().map_err(|e: std::num::ParseIntError| {
                ProxyError::InvalidEnv { name: TIMEOUT_ENV, reason: e.to_string() }
            })?;
            builder = builder.timeout_ms(timeout);
        }

        if let Some(cors) = lookup(CORS_ENV) {
            let cors = cors.trim().parse().map_err(|e: std::str::ParseBoolError| {
                ProxyError::InvalidEnv { name: CORS_ENV, reason: e.to_string() }
            })?;
            builder = builder.cors(cors);
        }

        builder.build()
    }
}

/// Builder for ProxyConfig
#[derive(Debug, Default)]
pub struct ProxyConfigBuilder {
    backend_url: Option<String>,
    port: Option<u16>,
    timeout_ms: Option<u64>,
    cors_enabled: Option<bool>,
}

impl ProxyConfigBuilder {
    /// Set the backend base URL
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the backend request timeout
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = Some(enabled);
        self
    }

    /// Build the configuration, rejecting an absent or blank backend URL
    pub fn build(self) -> ProxyResult<ProxyConfig> {
        let backend_url = self
            .backend_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ProxyError::MissingEnv(BACKEND_URL_ENV))?;

        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ProxyError::InvalidEnv {
                name: BACKEND_URL_ENV,
                reason: format!("expected an http(s) URL, got {backend_url}"),
            });
        }

        Ok(ProxyConfig {
            backend_url,
            port: self.port.unwrap_or(DEFAULT_PORT),
            timeout_ms: self.timeout_ms,
            cors_enabled: self.cors_enabled.unwrap_or(true),
        })
    }
}
