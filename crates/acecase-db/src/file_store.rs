//! JSON-file subscriber list for single-node deployments.
//!
//! The file holds one array of [`Subscriber`] records. Every insert
//! re-reads the file under a process-wide lock, appends, writes a sibling
//! temp file, and renames it over the original so a crash never leaves a
//! half-written list.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::subscriber::{InsertOutcome, Subscriber, normalize_email};

/// Subscriber list persisted as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct FileSubscriberStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileSubscriberStore {
    /// Create a store backed by `path`. The file is created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an address.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidEmail`] for a blank address,
    /// [`DbError::Io`] if the file cannot be read or written, or
    /// [`DbError::Serialization`] if the existing file is not a JSON list.
    pub async fn insert(&self, email: &str) -> Result<InsertOutcome, DbError> {
        let email = normalize_email(email)?;
        let _guard = self.lock.lock().await;

        let mut subscribers = self.read_all().await?;
        if subscribers.iter().any(|s| s.email == email) {
            tracing::debug!("subscriber already present");
            return Ok(InsertOutcome::AlreadySubscribed);
        }

        subscribers.push(Subscriber {
            email,
            subscribed_at: Utc::now(),
        });
        self.write_all(&subscribers).await?;

        tracing::info!(total = subscribers.len(), "subscriber added");
        Ok(InsertOutcome::Inserted)
    }

    /// All recorded subscribers in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Io`] or [`DbError::Serialization`] if the file
    /// cannot be loaded.
    pub async fn list(&self) -> Result<Vec<Subscriber>, DbError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// Number of subscribers.
    ///
    /// # Errors
    ///
    /// Same as [`FileSubscriberStore::list`].
    pub async fn count(&self) -> Result<u64, DbError> {
        let subscribers = self.list().await?;
        Ok(u64::try_from(subscribers.len()).unwrap_or(u64::MAX))
    }

    async fn read_all(&self) -> Result<Vec<Subscriber>, DbError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, subscribers: &[Subscriber]) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(subscribers)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSubscriberStore {
        FileSubscriberStore::new(dir.path().join("nested").join("subscribers.json"))
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_then_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let first = store.insert("Someone@Example.com").await.unwrap();
        assert_eq!(first, InsertOutcome::Inserted);

        let second = store.insert("  someone@example.COM ").await.unwrap();
        assert_eq!(second, InsertOutcome::AlreadySubscribed);

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.first().unwrap().email, "someone@example.com");
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).insert("a@example.com").await.unwrap();
        store_in(&dir).insert("b@example.com").await.unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.count().await.unwrap(), 2);
        assert!(!reopened.tmp_path().exists());
    }

    #[tokio::test]
    async fn concurrent_inserts_are_serialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(&format!("user{i}@example.com")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscribers.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSubscriberStore::new(path);
        assert!(matches!(
            store.insert("x@example.com").await,
            Err(DbError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.insert("  ").await,
            Err(DbError::InvalidEmail(_))
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
