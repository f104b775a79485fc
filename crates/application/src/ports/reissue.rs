//! Token reissue port

use async_trait::async_trait;
use thiserror::Error;
use tessera_domain::TokenPair;

/// Errors raised by the reissue exchange.
#[derive(Debug, Error)]
pub enum ReissueError {
    /// The reissue request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("reissue rejected with status {status}: {message}")]
    Protocol {
        /// HTTP status returned by the endpoint.
        status: u16,
        /// Response body or error description.
        message: String,
    },

    /// The response body could not be decoded as a token pair.
    #[error("failed to decode reissue response: {0}")]
    Decode(String),
}

/// Port for the token reissue exchange.
///
/// One network attempt per call; a failed reissue is terminal for that
/// call and is never retried here.
#[async_trait]
pub trait ReissueClient: Send + Sync {
    /// Exchanges a refresh token for a new access/refresh pair.
    ///
    /// # Errors
    /// Returns a [`ReissueError`] when the exchange fails for any reason.
    async fn reissue(&self, refresh_token: &str) -> Result<TokenPair, ReissueError>;
}
