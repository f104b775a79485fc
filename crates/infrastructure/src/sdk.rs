//! SDK facade wiring a complete session.
//!
//! [`AuthSdk`] assembles the file-backed stores, the reissue client, the
//! system clock, and the session manager into one object exposing the
//! public token-lifecycle operations.

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use tessera_application::ports::{
    Clock, CookieStore, HttpClient, HttpClientError, KeyValueStore, ReissueClient,
};
use tessera_application::{AuthorizedClient, SessionError, SessionManager};
use tessera_domain::{DomainResult, SessionConfig, TokenValidation};

use crate::adapters::{ReqwestHttpClient, SystemClock};
use crate::persistence::{FileCookieStore, FileKeyValueStore};
use crate::reissue::HttpReissueClient;

/// Facade over a fully wired token session.
pub struct AuthSdk {
    session: Arc<SessionManager>,
}

impl AuthSdk {
    /// Wires a session with file-backed stores under `data_dir` and the
    /// reissue endpoint from `config`.
    ///
    /// # Errors
    /// Returns an error if the configured reissue URL is invalid.
    pub fn new(config: SessionConfig, data_dir: impl Into<PathBuf>) -> DomainResult<Self> {
        let data_dir = data_dir.into();
        let cookies: Arc<dyn CookieStore> = Arc::new(FileCookieStore::new(&data_dir));
        let persistent: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&data_dir));
        let reissue: Arc<dyn ReissueClient> = Arc::new(HttpReissueClient::new(&config)?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

        Ok(Self {
            session: Arc::new(SessionManager::new(
                cookies, persistent, reissue, clock, config,
            )),
        })
    }

    /// Wraps an already-constructed session manager.
    #[must_use]
    pub const fn with_session(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    /// Returns the underlying session manager.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Validates a token's freshness (explicit value, else the stored
    /// access token).
    pub async fn validate_token(&self, token: Option<&str>) -> TokenValidation {
        self.session.validate_token(token).await
    }

    /// Returns the access token (explicit value, else the stored one).
    pub async fn get_token(&self, token: Option<&str>) -> Option<String> {
        self.session.access_token(token).await
    }

    /// Returns the stored refresh token.
    pub async fn get_refresh_token(&self) -> Option<String> {
        self.session.refresh_token().await
    }

    /// Stores a new token pair; `ttl_days` defaults to the configured
    /// value when `None`.
    ///
    /// # Errors
    /// Returns a [`SessionError`] if a store cannot be written.
    pub async fn set_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
        ttl_days: Option<u32>,
    ) -> Result<(), SessionError> {
        self.session
            .set_tokens(access_token, refresh_token, ttl_days)
            .await
    }

    /// Exchanges the refresh token (explicit value, else the stored one)
    /// for a new access token.
    pub async fn reissue_token(&self, refresh_token: Option<&str>) -> Option<String> {
        self.session.reissue_token(refresh_token).await
    }

    /// Clears the stored credentials and returns the validated redirect
    /// target, if one was supplied.
    ///
    /// # Errors
    /// Returns a [`SessionError`] if a store cannot be written or the
    /// redirect URL does not parse.
    pub async fn logout(&self, redirect_url: Option<&str>) -> Result<Option<Url>, SessionError> {
        self.session.logout(redirect_url).await
    }

    /// Builds an authorized HTTP client bound to this session, with the
    /// refresh coordinator installed on its response path.
    ///
    /// Requests through the client carry `Authorization: Bearer <token>`
    /// when a token is available; `token` overrides the stored access
    /// token for this client only.
    ///
    /// # Errors
    /// Returns an error if the HTTP transport cannot be created.
    pub fn authorized_client(
        &self,
        base_url: Option<Url>,
        token: Option<String>,
    ) -> Result<AuthorizedClient, HttpClientError> {
        let transport: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
        Ok(AuthorizedClient::new(
            transport,
            Arc::clone(&self.session),
            base_url,
            token,
        ))
    }
}
