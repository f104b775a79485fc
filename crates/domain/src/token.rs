//! Bearer token types and lenient claim decoding.
//!
//! Decoding here is structural only: the payload segment is read as
//! base64-encoded JSON without any signature verification. Validity
//! means "well-formed and not about to expire", not cryptographic trust.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access/refresh token pair as exchanged with the reissue endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential attached to requests.
    pub access_token: String,
    /// Long-lived credential consumed by the reissue operation.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Claims carried in a bearer token payload.
///
/// Only `exp` matters for freshness checks; `iat` and `sub` are surfaced
/// when present because callers inspect them for display and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry as epoch seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at as epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Subject identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl TokenClaims {
    /// Decodes the payload segment of a three-segment bearer token.
    ///
    /// Accepts the URL-safe base64 alphabet with or without padding, and
    /// falls back to the standard alphabet. Returns `None` on any
    /// structural failure; this function never panics.
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        let payload = parts[1].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .ok()?;

        serde_json::from_slice(&bytes).ok()
    }
}

/// Reason a token failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No token was supplied and none is stored.
    #[error("No token provided")]
    Missing,
    /// The token is not a decodable three-segment token with an `exp` claim.
    #[error("Invalid token format")]
    Malformed,
}

/// Outcome of a token freshness check. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenValidation {
    /// Whether the token is well-formed and not about to expire.
    pub is_valid: bool,
    /// Seconds until expiry, reported even when the token is stale.
    pub expires_in: Option<i64>,
    /// Failure reason when the token could not be evaluated.
    pub error: Option<ValidationError>,
}

impl TokenValidation {
    /// Result for an absent token.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            is_valid: false,
            expires_in: None,
            error: Some(ValidationError::Missing),
        }
    }

    /// Result for an undecodable or claim-less token.
    #[must_use]
    pub const fn malformed() -> Self {
        Self {
            is_valid: false,
            expires_in: None,
            error: Some(ValidationError::Malformed),
        }
    }

    /// Evaluates a token against the current time.
    ///
    /// `expires_in` is `exp - now` in whole seconds; the token is valid
    /// when that exceeds `buffer_secs`. The buffer keeps callers from
    /// sending a token that will expire mid-flight.
    #[must_use]
    pub fn evaluate(token: &str, now: DateTime<Utc>, buffer_secs: i64) -> Self {
        let Some(exp) = TokenClaims::decode(token).and_then(|claims| claims.exp) else {
            return Self::malformed();
        };

        let expires_in = exp - now.timestamp();
        Self {
            is_valid: expires_in > buffer_secs,
            expires_in: Some(expires_in),
            error: None,
        }
    }
}
