//! Credential storage ports
//!
//! Two separate surfaces, both host-provided: a cookie-like store scoped
//! to the site root (access token, expiry in days) and a persistent
//! key-value store with no expiry (refresh token).

use async_trait::async_trait;
use thiserror::Error;
use tessera_domain::CookieRecord;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Cookie-like store scoped to the site root.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Returns the live value under `name`; expired records read as absent.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be read.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Writes a record, overwriting any prior value under the same name.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be written.
    async fn set(&self, record: CookieRecord) -> Result<(), StorageError>;

    /// Removes the record under `name`; removing a missing record is a no-op.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be written.
    async fn remove(&self, name: &str) -> Result<(), StorageError>;
}

/// Persistent key-value store with no expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, overwriting any prior value under the same key.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`; removing a missing key is a no-op.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the backing store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
