//! Session configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Seconds before expiry at which a token is treated as stale.
pub const DEFAULT_EXPIRY_BUFFER_SECS: i64 = 300;

/// Canonical access-cookie lifetime in days.
pub const DEFAULT_TTL_DAYS: u32 = 1;

/// Long-lived cookie variant (10 years) observed in older deployments.
///
/// Retained for hosts migrating from the previous contract; the default
/// is [`DEFAULT_TTL_DAYS`].
pub const LEGACY_TTL_DAYS: u32 = 3650;

/// Path of the token reissue endpoint, relative to the auth base URL.
pub const DEFAULT_REISSUE_PATH: &str = "/auth/reissue";

/// Request timeout applied to the reissue call and authorized requests.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ACCESS_COOKIE_NAME: &str = "ACCESS";
const REFRESH_TOKEN_KEY: &str = "REFRESH";

/// Configuration for a token session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the authentication service.
    pub auth_base_url: Url,
    /// Reissue endpoint path, joined onto the base URL.
    pub reissue_path: String,
    /// Name of the cookie record holding the access token.
    pub access_cookie_name: String,
    /// Key of the persistent entry holding the refresh token.
    pub refresh_token_key: String,
    /// Access-cookie lifetime in days.
    pub ttl_days: u32,
    /// Freshness buffer in seconds.
    pub expiry_buffer_secs: i64,
    /// Network timeout in milliseconds.
    pub timeout_ms: u64,
}

impl SessionConfig {
    /// Creates a configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(auth_base_url: Url) -> Self {
        Self {
            auth_base_url,
            reissue_path: DEFAULT_REISSUE_PATH.to_string(),
            access_cookie_name: ACCESS_COOKIE_NAME.to_string(),
            refresh_token_key: REFRESH_TOKEN_KEY.to_string(),
            ttl_days: DEFAULT_TTL_DAYS,
            expiry_buffer_secs: DEFAULT_EXPIRY_BUFFER_SECS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the access-cookie lifetime in days.
    #[must_use]
    pub const fn with_ttl_days(mut self, days: u32) -> Self {
        self.ttl_days = days;
        self
    }

    /// Sets the freshness buffer in seconds.
    #[must_use]
    pub const fn with_expiry_buffer_secs(mut self, secs: i64) -> Self {
        self.expiry_buffer_secs = secs;
        self
    }

    /// Sets the reissue endpoint path.
    #[must_use]
    pub fn with_reissue_path(mut self, path: impl Into<String>) -> Self {
        self.reissue_path = path.into();
        self
    }

    /// Sets the network timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Resolves the full reissue endpoint URL.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidUrl` if the configured path cannot be
    /// joined onto the base URL.
    pub fn reissue_url(&self) -> DomainResult<Url> {
        self.auth_base_url
            .join(&self.reissue_path)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.reissue_path)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_url() -> Url {
        Url::parse("https://auth.example.com").unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new(base_url());
        assert_eq!(config.ttl_days, 1);
        assert_eq!(config.expiry_buffer_secs, 300);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.access_cookie_name, "ACCESS");
        assert_eq!(config.refresh_token_key, "REFRESH");
    }

    #[test]
    fn test_reissue_url_joins_path() {
        let config = SessionConfig::new(base_url());
        assert_eq!(
            config.reissue_url().unwrap().as_str(),
            "https://auth.example.com/auth/reissue"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::new(base_url())
            .with_ttl_days(LEGACY_TTL_DAYS)
            .with_expiry_buffer_secs(60)
            .with_reissue_path("/v2/reissue")
            .with_timeout_ms(5_000);

        assert_eq!(config.ttl_days, 3650);
        assert_eq!(config.expiry_buffer_secs, 60);
        assert_eq!(config.timeout_ms, 5_000);
        assert_eq!(
            config.reissue_url().unwrap().as_str(),
            "https://auth.example.com/v2/reissue"
        );
    }
}
