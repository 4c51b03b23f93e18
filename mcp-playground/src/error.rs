//! Error types for the playground client

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the proxy
#[derive(Error, Debug)]
pub enum ClientError {
    /// Proxy base URL is unusable
    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(String),

    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Proxy answered with an unsuccessful envelope
    #[error("{message}")]
    Rejected { status_code: u16, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
