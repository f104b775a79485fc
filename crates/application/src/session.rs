//! Session manager: token storage, validation, reissue, teardown.

use std::sync::Arc;

use url::Url;

use tessera_domain::{CookieRecord, SessionConfig, TokenValidation};

use crate::error::SessionError;
use crate::ports::{Clock, CookieStore, KeyValueStore, ReissueClient};

/// Manages the lifecycle of one token session.
///
/// The access token lives in the cookie store, the refresh token in the
/// persistent store. All operations treat storage read failures as an
/// absent credential; write failures propagate.
pub struct SessionManager {
    cookies: Arc<dyn CookieStore>,
    persistent: Arc<dyn KeyValueStore>,
    reissue_client: Arc<dyn ReissueClient>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a session manager over the given collaborators.
    #[must_use]
    pub fn new(
        cookies: Arc<dyn CookieStore>,
        persistent: Arc<dyn KeyValueStore>,
        reissue_client: Arc<dyn ReissueClient>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Self {
        Self {
            cookies,
            persistent,
            reissue_client,
            clock,
            config,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the access token: the explicit value if supplied, else the
    /// stored one.
    pub async fn access_token(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(token) = explicit {
            return Some(token.to_string());
        }

        match self.cookies.get(&self.config.access_cookie_name).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "access token read failed");
                None
            }
        }
    }

    /// Returns the stored refresh token. No explicit override exists for
    /// this credential.
    pub async fn refresh_token(&self) -> Option<String> {
        match self.persistent.get(&self.config.refresh_token_key).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "refresh token read failed");
                None
            }
        }
    }

    /// Stores a new token pair, overwriting any prior values.
    ///
    /// The access token is written with the given TTL in days (the
    /// configured default when `None`) at the site-root path; the refresh
    /// token is written with no expiry.
    ///
    /// # Errors
    /// Returns a [`SessionError`] if either store cannot be written.
    pub async fn set_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
        ttl_days: Option<u32>,
    ) -> Result<(), SessionError> {
        let days = ttl_days.unwrap_or(self.config.ttl_days);
        let record =
            CookieRecord::new(self.config.access_cookie_name.clone(), access_token)
                .with_ttl_days(days);

        self.cookies.set(record).await?;
        self.persistent
            .set(&self.config.refresh_token_key, refresh_token)
            .await?;
        Ok(())
    }

    /// Validates a token's freshness. Never fails: absent or malformed
    /// tokens produce an invalid result carrying the reason.
    pub async fn validate_token(&self, explicit: Option<&str>) -> TokenValidation {
        let Some(token) = self.access_token(explicit).await else {
            return TokenValidation::missing();
        };

        TokenValidation::evaluate(&token, self.clock.now(), self.config.expiry_buffer_secs)
    }

    /// Exchanges the refresh token for a new pair and returns the new
    /// access token.
    ///
    /// With no explicit token this call manages the ambient session: the
    /// new pair is persisted on success, and a failed exchange forces a
    /// logout so a poisoned session is never reused. An explicitly
    /// supplied refresh token makes the call session-neutral: nothing is
    /// persisted and nothing is cleared.
    ///
    /// Returns `None` when no refresh token is available (no network call
    /// is made) and on any exchange failure.
    pub async fn reissue_token(&self, explicit: Option<&str>) -> Option<String> {
        let ambient = explicit.is_none();
        let refresh = match explicit {
            Some(token) => Some(token.to_string()),
            None => self.refresh_token().await,
        };
        let refresh = refresh?;

        match self.reissue_client.reissue(&refresh).await {
            Ok(pair) => {
                if ambient
                    && let Err(err) = self
                        .set_tokens(&pair.access_token, &pair.refresh_token, None)
                        .await
                {
                    tracing::warn!(error = %err, "failed to persist reissued tokens");
                }
                Some(pair.access_token)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token reissue failed");
                if ambient && let Err(logout_err) = self.logout(None).await {
                    tracing::warn!(error = %logout_err, "logout after failed reissue failed");
                }
                None
            }
        }
    }

    /// Clears the stored credentials.
    ///
    /// Idempotent: logging out of an empty session is a no-op. A supplied
    /// redirect URL is validated and returned for the host to navigate
    /// to; navigation itself is a host concern.
    ///
    /// # Errors
    /// Returns a [`SessionError`] if a store cannot be written or the
    /// redirect URL does not parse.
    pub async fn logout(&self, redirect_url: Option<&str>) -> Result<Option<Url>, SessionError> {
        self.cookies.remove(&self.config.access_cookie_name).await?;
        self.persistent
            .remove(&self.config.refresh_token_key)
            .await?;

        redirect_url
            .map(|raw| {
                Url::parse(raw).map_err(|e| SessionError::InvalidRedirect(format!("{e}: {raw}")))
            })
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use tessera_domain::{TokenPair, ValidationError};

    use crate::ports::ReissueError;
    use crate::stores::{MemoryCookieStore, MemoryKeyValueStore};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct StubReissue {
        response: Result<TokenPair, ReissueError>,
        calls: AtomicUsize,
    }

    impl StubReissue {
        fn ok(pair: TokenPair) -> Self {
            Self {
                response: Ok(pair),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(ReissueError::Network("connection reset".to_string())),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReissueClient for StubReissue {
        async fn reissue(&self, _refresh_token: &str) -> Result<TokenPair, ReissueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(pair) => Ok(pair.clone()),
                Err(ReissueError::Network(msg)) => Err(ReissueError::Network(msg.clone())),
                Err(_) => unreachable!("stub only models network failures"),
            }
        }
    }

    fn token_with_exp(exp: i64) -> String {
        let claims = serde_json::json!({ "exp": exp });
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("header.{payload}.signature")
    }

    fn manager(reissue: Arc<StubReissue>) -> SessionManager {
        let config =
            SessionConfig::new(Url::parse("https://auth.example.com").unwrap());
        SessionManager::new(
            Arc::new(MemoryCookieStore::new()),
            Arc::new(MemoryKeyValueStore::new()),
            reissue,
            Arc::new(FixedClock(Utc::now())),
            config,
        )
    }

    #[tokio::test]
    async fn test_set_tokens_round_trip() {
        let session = manager(Arc::new(StubReissue::failing()));

        session
            .set_tokens("access-1", "refresh-1", None)
            .await
            .unwrap();

        assert_eq!(session.access_token(None).await.unwrap(), "access-1");
        assert_eq!(session.refresh_token().await.unwrap(), "refresh-1");
    }

    #[tokio::test]
    async fn test_explicit_token_wins_over_stored() {
        let session = manager(Arc::new(StubReissue::failing()));
        session.set_tokens("stored", "refresh", None).await.unwrap();

        assert_eq!(
            session.access_token(Some("explicit")).await.unwrap(),
            "explicit"
        );
    }

    #[tokio::test]
    async fn test_validate_without_any_token() {
        let session = manager(Arc::new(StubReissue::failing()));

        let result = session.validate_token(None).await;
        assert!(!result.is_valid);
        assert_eq!(result.error, Some(ValidationError::Missing));
    }

    #[tokio::test]
    async fn test_validate_stored_token() {
        let session = manager(Arc::new(StubReissue::failing()));
        let token = token_with_exp(Utc::now().timestamp() + 3600);
        session.set_tokens(&token, "refresh", None).await.unwrap();

        let result = session.validate_token(None).await;
        assert!(result.is_valid);
        assert!(result.expires_in.unwrap() > 300);
    }

    #[tokio::test]
    async fn test_validate_malformed_stored_token() {
        let session = manager(Arc::new(StubReissue::failing()));
        session
            .set_tokens("not-a-jwt", "refresh", None)
            .await
            .unwrap();

        let result = session.validate_token(None).await;
        assert_eq!(result.error, Some(ValidationError::Malformed));
    }

    #[tokio::test]
    async fn test_ambient_reissue_persists_new_pair() {
        let reissue = Arc::new(StubReissue::ok(TokenPair::new("new-access", "new-refresh")));
        let session = manager(Arc::clone(&reissue));
        session
            .set_tokens("old-access", "old-refresh", None)
            .await
            .unwrap();

        let token = session.reissue_token(None).await.unwrap();

        assert_eq!(token, "new-access");
        assert_eq!(session.access_token(None).await.unwrap(), "new-access");
        assert_eq!(session.refresh_token().await.unwrap(), "new-refresh");
        assert_eq!(reissue.call_count(), 1);
    }

    #[tokio::test]
    async fn test_explicit_reissue_does_not_persist() {
        let reissue = Arc::new(StubReissue::ok(TokenPair::new("new-access", "new-refresh")));
        let session = manager(Arc::clone(&reissue));
        session
            .set_tokens("old-access", "old-refresh", None)
            .await
            .unwrap();

        let token = session.reissue_token(Some("external-refresh")).await.unwrap();

        assert_eq!(token, "new-access");
        // The ambient session is untouched.
        assert_eq!(session.access_token(None).await.unwrap(), "old-access");
        assert_eq!(session.refresh_token().await.unwrap(), "old-refresh");
    }

    #[tokio::test]
    async fn test_reissue_without_refresh_token_skips_network() {
        let reissue = Arc::new(StubReissue::ok(TokenPair::new("new-access", "new-refresh")));
        let session = manager(Arc::clone(&reissue));

        assert!(session.reissue_token(None).await.is_none());
        assert_eq!(reissue.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_ambient_reissue_forces_logout() {
        let session = manager(Arc::new(StubReissue::failing()));
        session.set_tokens("access", "refresh", None).await.unwrap();

        assert!(session.reissue_token(None).await.is_none());

        assert!(session.access_token(None).await.is_none());
        assert!(session.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_explicit_reissue_keeps_session() {
        let session = manager(Arc::new(StubReissue::failing()));
        session.set_tokens("access", "refresh", None).await.unwrap();

        assert!(session.reissue_token(Some("external")).await.is_none());

        assert_eq!(session.access_token(None).await.unwrap(), "access");
        assert_eq!(session.refresh_token().await.unwrap(), "refresh");
    }

    #[tokio::test]
    async fn test_logout_clears_and_is_idempotent() {
        let session = manager(Arc::new(StubReissue::failing()));
        session.set_tokens("access", "refresh", None).await.unwrap();

        session.logout(None).await.unwrap();
        assert!(session.access_token(None).await.is_none());
        assert!(session.refresh_token().await.is_none());

        // Logging out of an empty session is a no-op.
        session.logout(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_returns_validated_redirect() {
        let session = manager(Arc::new(StubReissue::failing()));

        let redirect = session
            .logout(Some("https://app.example.com/login"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(redirect.as_str(), "https://app.example.com/login");

        let err = session.logout(Some("::not a url::")).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidRedirect(_)));
    }
}
