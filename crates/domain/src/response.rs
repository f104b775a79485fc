//! Response specification type

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns true if this status signals an authentication failure
    /// eligible for the refresh protocol (401 or 403).
    #[must_use]
    pub const fn is_auth_failure(self) -> bool {
        matches!(self.0, 401 | 403)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// HTTP response specification.
///
/// Contains all information received from an HTTP call. Non-success
/// statuses are still responses, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as a map.
    pub headers: HashMap<String, String>,
    /// Response body as raw bytes.
    pub body: Vec<u8>,
    /// Response time.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into().as_u16(),
            headers,
            body,
            duration,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// Returns true if the status code is an auth failure (401/403).
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        self.status_code().is_auth_failure()
    }

    /// Returns the body as a lossy UTF-8 string.
    #[must_use]
    pub fn body_as_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Attempts to parse the body as JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_code_categories() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(404).is_client_error());
        assert!(StatusCode::new(500).is_server_error());
        assert!(!StatusCode::new(200).is_client_error());
    }

    #[test]
    fn test_auth_failure_statuses() {
        assert!(StatusCode::new(401).is_auth_failure());
        assert!(StatusCode::new(403).is_auth_failure());
        assert!(!StatusCode::new(400).is_auth_failure());
        assert!(!StatusCode::new(404).is_auth_failure());
        assert!(!StatusCode::new(500).is_auth_failure());
    }

    #[test]
    fn test_response_accessors() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = ResponseSpec::new(
            200,
            headers,
            br#"{"ok":true}"#.to_vec(),
            Duration::from_millis(12),
        );

        assert!(response.is_success());
        assert!(!response.is_auth_failure());
        assert_eq!(
            response.get_header("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(response.body_as_json().unwrap()["ok"], true);
    }

    #[test]
    fn test_body_as_string_lossy() {
        let response = ResponseSpec::new(401, HashMap::new(), b"denied".to_vec(), Duration::ZERO);
        assert_eq!(response.body_as_string_lossy(), "denied");
        assert!(response.is_auth_failure());
    }
}
