//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;
use tessera_domain::{RequestSpec, ResponseSpec};

/// Errors raised by the HTTP transport.
///
/// Only transport-level failures are errors; a response with a non-2xx
/// status is still an `Ok` response.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request URL could not be parsed or resolved.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request body is invalid for its content type.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("HTTP client error: {0}")]
    Other(String),
}

/// Port for executing HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a request and returns the response.
    ///
    /// # Errors
    /// Returns an error only for transport failures; HTTP error statuses
    /// are returned as responses.
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}
