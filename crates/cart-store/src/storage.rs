//! # Storage Backends
//!
//! The async key-value seam between the cart store and device storage,
//! plus the two bundled backends.
//!
//! The store treats storage as an opaque string slot: it reads one key at
//! startup and rewrites that key after every mutation. Anything that can
//! get/set strings by key can back a cart.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;

/// An opaque async key-value string store.
///
/// ## Contract
/// - `get` returns `None` for keys that were never set (not an error)
/// - `set` replaces the whole value for the key
/// - keys and values are plain strings; encoding is the caller's business
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Values do not survive the process; useful for tests and for running the
/// cart without device persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under a base directory.
///
/// ## Layout
/// A key maps to `<dir>/<sanitized-key>.json`. Key characters outside
/// `[A-Za-z0-9._-]` are replaced with `_` so keys like `@marketplace:cart`
/// produce portable file names.
///
/// ## Crash Safety
/// All writes go to a `.tmp` sibling first, then `rename()` over the target,
/// so a crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a file storage rooted at `dir`. The directory is created on
    /// first write if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", self.dir.display(), e)))?;
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = value.len(), "storage write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }
}
