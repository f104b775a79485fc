//! HTTP reissue client.
//!
//! Performs the single network exchange of a refresh token for a new
//! token pair: `POST <auth_base_url><reissue_path>` with a JSON body.
//! One attempt per call; retry policy, if any, belongs to callers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use tessera_application::ports::{ReissueClient, ReissueError};
use tessera_domain::{DomainResult, SessionConfig, TokenPair};

/// Reissue request wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReissueRequest<'a> {
    refresh_token: &'a str,
}

/// Reissue response wire format.
#[derive(Debug, Deserialize)]
struct ReissueResponse {
    access_token: String,
    refresh_token: String,
}

/// Reissue client backed by reqwest.
pub struct HttpReissueClient {
    http: reqwest::Client,
    reissue_url: Url,
}

impl HttpReissueClient {
    /// Creates a reissue client for the configured endpoint.
    ///
    /// The configured timeout applies to the whole exchange.
    ///
    /// # Errors
    /// Returns an error if the reissue path cannot be joined onto the
    /// base URL.
    pub fn new(config: &SessionConfig) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            http,
            reissue_url: config.reissue_url()?,
        })
    }

    /// Returns the resolved reissue endpoint URL.
    #[must_use]
    pub const fn reissue_url(&self) -> &Url {
        &self.reissue_url
    }
}

#[async_trait]
impl ReissueClient for HttpReissueClient {
    async fn reissue(&self, refresh_token: &str) -> Result<TokenPair, ReissueError> {
        let response = self
            .http
            .post(self.reissue_url.clone())
            .json(&ReissueRequest { refresh_token })
            .send()
            .await
            .map_err(|e| ReissueError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "reissue endpoint rejected the exchange");
            return Err(ReissueError::Protocol {
                status: status.as_u16(),
                message,
            });
        }

        let body: ReissueResponse = response
            .json()
            .await
            .map_err(|e| ReissueError::Decode(e.to_string()))?;

        Ok(TokenPair::new(body.access_token, body.refresh_token))
    }
}
