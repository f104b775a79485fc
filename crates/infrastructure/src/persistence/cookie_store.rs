//! File-backed cookie store implementation.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use tessera_application::ports::{CookieStore, StorageError};
use tessera_domain::{CookieJar, CookieRecord};

const COOKIES_FILE: &str = "cookies.json";

/// Cookie store persisted as `cookies.json` in the data directory.
///
/// The whole jar is loaded and rewritten per operation; expired records
/// are dropped on write so the file does not accumulate stale entries.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
}

impl FileCookieStore {
    /// Creates a store rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(COOKIES_FILE),
        }
    }

    async fn load(&self) -> Result<CookieJar, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(CookieJar::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, jar: &CookieJar) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(jar)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl CookieStore for FileCookieStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let jar = self.load().await?;
        Ok(jar.get(name, Utc::now()).map(|record| record.value.clone()))
    }

    async fn set(&self, record: CookieRecord) -> Result<(), StorageError> {
        let mut jar = self.load().await?;
        jar.cleanup_expired(Utc::now());
        jar.set(record);
        self.save(&jar).await
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let mut jar = self.load().await?;
        jar.remove(name);
        self.save(&jar).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCookieStore::new(dir.path());

        assert!(store.get("ACCESS").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileCookieStore::new(dir.path());
            store
                .set(CookieRecord::new("ACCESS", "token-1").with_ttl_days(1))
                .await
                .unwrap();
        }

        let reopened = FileCookieStore::new(dir.path());
        assert_eq!(reopened.get("ACCESS").await.unwrap().unwrap(), "token-1");
    }

    #[tokio::test]
    async fn test_expired_records_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCookieStore::new(dir.path());

        let mut record = CookieRecord::new("ACCESS", "stale");
        record.expires = Some(Utc::now() - Duration::minutes(1));
        store.set(record).await.unwrap();

        assert!(store.get("ACCESS").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCookieStore::new(dir.path());
        store.set(CookieRecord::new("ACCESS", "v")).await.unwrap();

        store.remove("ACCESS").await.unwrap();
        assert!(store.get("ACCESS").await.unwrap().is_none());

        store.remove("ACCESS").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cookies.json"), b"{not json")
            .await
            .unwrap();

        let store = FileCookieStore::new(dir.path());
        let err = store.get("ACCESS").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
