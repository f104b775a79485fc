//! In-memory credential stores.
//!
//! Thread-safe map-backed implementations of the storage ports, used in
//! tests and by hosts that keep the session in process memory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tessera_domain::{CookieJar, CookieRecord};

use crate::ports::{CookieStore, KeyValueStore, StorageError};

/// In-memory cookie store backed by a [`CookieJar`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    jar: Arc<RwLock<CookieJar>>,
}

impl MemoryCookieStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let jar = self.jar.read().await;
        Ok(jar.get(name, Utc::now()).map(|record| record.value.clone()))
    }

    async fn set(&self, record: CookieRecord) -> Result<(), StorageError> {
        let mut jar = self.jar.write().await;
        jar.set(record);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let mut jar = self.jar.write().await;
        jar.remove(name);
        Ok(())
    }
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
