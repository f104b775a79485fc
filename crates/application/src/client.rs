//! Authorized HTTP client with transparent token refresh.
//!
//! Wraps a transport with the refresh protocol: outgoing requests get a
//! bearer header when a token is available, and a 401/403 response puts
//! the request through the single-flight coordinator, so a cycle makes
//! one reissue call and every queued request replays once with the new
//! token.

use std::sync::Arc;

use url::Url;

use tessera_domain::{RequestSpec, ResponseSpec};

use crate::coordinator::{RefreshCoordinator, RefreshTicket};
use crate::ports::{HttpClient, HttpClientError};
use crate::session::SessionManager;

/// HTTP client bound to a token session.
///
/// Each client owns its coordinator, so independent clients never share
/// refresh state.
pub struct AuthorizedClient {
    transport: Arc<dyn HttpClient>,
    session: Arc<SessionManager>,
    coordinator: RefreshCoordinator,
    base_url: Option<Url>,
    token_override: Option<String>,
}

impl AuthorizedClient {
    /// Creates an authorized client.
    ///
    /// Relative request URLs are resolved against `base_url`. When
    /// `token_override` is set it is used instead of the stored access
    /// token for every request on this client.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpClient>,
        session: Arc<SessionManager>,
        base_url: Option<Url>,
        token_override: Option<String>,
    ) -> Self {
        Self {
            transport,
            session,
            coordinator: RefreshCoordinator::new(),
            base_url,
            token_override,
        }
    }

    /// Returns the session this client is bound to.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Executes a request with authorization and transparent refresh.
    ///
    /// The bearer header is attached only when a token is available; a
    /// client with no token sends unauthenticated requests rather than a
    /// placeholder header. Responses pass through unchanged unless the
    /// status is 401/403 and the request has not been retried yet.
    ///
    /// # Errors
    /// Returns a [`HttpClientError`] for transport-level failures only;
    /// HTTP error statuses are returned as responses.
    pub async fn execute(
        &self,
        mut request: RequestSpec,
    ) -> Result<ResponseSpec, HttpClientError> {
        self.resolve_url(&mut request)?;

        if request.authorization().is_none()
            && let Some(token) = self
                .session
                .access_token(self.token_override.as_deref())
                .await
        {
            request.set_bearer(&token);
        }

        let response = self.transport.execute(&request).await?;
        if !response.is_auth_failure() || request.retried {
            return Ok(response);
        }

        // One retry per request, even if the reissued token is rejected.
        request.mark_retried();
        self.refresh_and_resubmit(request, response).await
    }

    /// Runs the refresh protocol for a request that failed with 401/403
    /// and resubmits it once a new token exists. `failed` is the original
    /// response, propagated unchanged when no new token materializes.
    async fn refresh_and_resubmit(
        &self,
        mut request: RequestSpec,
        failed: ResponseSpec,
    ) -> Result<ResponseSpec, HttpClientError> {
        match self.coordinator.begin().await {
            RefreshTicket::Leader => {
                let outcome = self.session.reissue_token(None).await;
                if outcome.is_none() {
                    // Also covers the no-refresh-token path, where the
                    // ambient reissue never ran its own failure cleanup.
                    if let Err(err) = self.session.logout(None).await {
                        tracing::warn!(error = %err, "logout after failed refresh failed");
                    }
                }

                // Restore IDLE and release the waiters before resubmitting.
                self.coordinator.finish(outcome.clone()).await;

                match outcome {
                    Some(token) => {
                        tracing::debug!(request_id = %request.id, "resubmitting after refresh");
                        request.set_bearer(&token);
                        self.transport.execute(&request).await
                    }
                    None => Ok(failed),
                }
            }
            RefreshTicket::Waiter(receiver) => match receiver.await {
                Ok(Some(token)) => {
                    tracing::debug!(request_id = %request.id, "resubmitting after awaited refresh");
                    request.set_bearer(&token);
                    self.transport.execute(&request).await
                }
                // Failed cycle, or the leader vanished: the original
                // error is this caller's outcome.
                Ok(None) | Err(_) => Ok(failed),
            },
        }
    }

    fn resolve_url(&self, request: &mut RequestSpec) -> Result<(), HttpClientError> {
        if Url::parse(&request.url).is_ok() {
            return Ok(());
        }

        let Some(base) = &self.base_url else {
            return Err(HttpClientError::InvalidUrl(request.url.clone()));
        };

        let joined = base
            .join(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        request.url = joined.to_string();
        Ok(())
    }
}
