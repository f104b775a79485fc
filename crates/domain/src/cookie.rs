//! Cookie-scoped storage records.
//!
//! The access token lives in a cookie-like store scoped to the site
//! root. These types model a single named record with an optional
//! expiry-in-days, plus the name-keyed jar the file store serializes.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Path records are written under.
pub const SITE_ROOT_PATH: &str = "/";

/// A single named cookie record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CookieRecord {
    /// Record name.
    pub name: String,
    /// Record value.
    pub value: String,
    /// Path the record applies to.
    #[serde(default = "default_path")]
    pub path: String,
    /// Expiration time (None for session records).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// When the record was written.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_path() -> String {
    SITE_ROOT_PATH.to_string()
}

impl CookieRecord {
    /// Creates a session record (no expiry) at the site root.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: default_path(),
            expires: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the expiry to the given number of days from creation.
    #[must_use]
    pub fn with_ttl_days(mut self, days: u32) -> Self {
        self.expires = Some(self.created_at + Duration::days(i64::from(days)));
        self
    }

    /// Check if the record is expired at the given instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|exp| exp <= now)
    }

    /// Check if this is a session record (no expiration).
    #[must_use]
    pub const fn is_session(&self) -> bool {
        self.expires.is_none()
    }
}

/// Name-keyed jar of cookie records.
///
/// This is the serialized form of the file-backed cookie store; expired
/// records are filtered on read rather than eagerly evicted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CookieJar {
    #[serde(default)]
    cookies: HashMap<String, CookieRecord>,
}

impl CookieJar {
    /// Creates a new empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, overwriting any prior value under the same name.
    pub fn set(&mut self, record: CookieRecord) {
        self.cookies.insert(record.name.clone(), record);
    }

    /// Returns the live record under `name`, filtering expired entries.
    #[must_use]
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<&CookieRecord> {
        self.cookies
            .get(name)
            .filter(|record| !record.is_expired_at(now))
    }

    /// Removes a record by name.
    pub fn remove(&mut self, name: &str) -> Option<CookieRecord> {
        self.cookies.remove(name)
    }

    /// Drops every record that has expired by `now`.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) {
        self.cookies.retain(|_, record| !record.is_expired_at(now));
    }

    /// Number of stored records, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if the jar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}
