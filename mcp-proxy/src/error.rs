//! Error types for the MCP proxy

use thiserror::Error;

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Errors that can occur while configuring or serving the proxy.
///
/// Request handling never surfaces these to callers directly; handlers turn
/// them into a [`ResponseEnvelope`](crate::envelope::ResponseEnvelope).
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Required environment variable is not set
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    /// Environment variable is set but unusable
    #[error("Invalid value for {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    /// Incoming request body is not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
