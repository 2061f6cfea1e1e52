//! Key-value storage backends.
//!
//! Each logical key maps to one JSON document. [`FileStore`] keeps one
//! `<key>.json` file per key in a data directory; [`MemoryStore`] keeps
//! everything in process and is what tests use.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::SettingsError;

/// Minimal async key-value interface over persisted documents.
pub trait SettingsStore: Clone + Send + Sync + 'static {
    /// Read a document. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, SettingsError>> + Send;

    /// Write a document, replacing any previous value.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), SettingsError>> + Send;

    /// Delete a document. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), SettingsError>> + Send;
}

/// Documents stored as `<data_dir>/<key>.json`.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Arc<PathBuf>,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SettingsError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SettingsStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SettingsError::Io { key: key.to_string(), source: e }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), SettingsError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| SettingsError::Io { key: key.to_string(), source };

        tokio::fs::create_dir_all(self.dir.as_path()).await.map_err(io_err)?;
        tokio::fs::write(&tmp, value).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;

        tracing::debug!(key, path = %path.display(), "Wrote settings document");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SettingsError::Io { key: key.to_string(), source: e }),
        }
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), SettingsError> {
        self.docs.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.docs.write().await.remove(key);
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), SettingsError> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(SettingsError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("productSettings").await.unwrap(), None);

        store.set("productSettings", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("productSettings").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data/productSettings.json").exists());
        assert!(!dir.path().join("data/productSettings.json.tmp").exists());

        store.set("productSettings", "[1]".to_string()).await.unwrap();
        assert_eq!(store.get("productSettings").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.remove("customProducts").await.unwrap();
        store.set("customProducts", "[]".to_string()).await.unwrap();
        store.remove("customProducts").await.unwrap();
        assert_eq!(store.get("customProducts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.get("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, SettingsError::InvalidKey(_)));
        assert!(store.set("", String::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(other.len().await, 1);

        other.remove("k").await.unwrap();
        assert!(store.is_empty().await);
    }
}
