//! # Snapshot Storage
//!
//! An opaque key/value blob store. The cart writes one blob, under
//! [`rocket_core::CART_STORAGE_KEY`], holding its JSON snapshot.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryBlobStore   HashMap behind a Mutex; counts writes (tests)       │
//! │  FileBlobStore     one file per key under a data directory             │
//! │                    write to <name>.tmp, then rename over <name>        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads happen once at start-up and writes happen inside a commit, so the
//! trait is synchronous.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::StorageError;

/// Key/value store for serialized snapshots.
pub trait BlobStore: Send + Sync {
    /// Returns the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `blob` under `key`, replacing any previous value.
    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one blob.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store
            .blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), blob.to_string());
        store
    }

    /// Number of `set` calls so far (seeding does not count).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(key.to_string(), blob.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Stores each key as `<sanitized key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Opens (and creates if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the file backing `key`.
    ///
    /// `[A-Za-z0-9-]` is kept; every other byte, `_` included, is written as
    /// `_XX` hex, so distinct keys never share a file. `@RocketShoes:cart`
    /// is stored as `_40RocketShoes_3Acart.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = blob.len(), "Snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "[]").unwrap();
        store.set("k", "[1]").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_memory_store_seed_is_not_a_write() {
        let store = MemoryBlobStore::with_blob("k", "[]");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("@RocketShoes:cart").unwrap(), None);

        store.set("@RocketShoes:cart", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            store.get("@RocketShoes:cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        // reopened store sees the same data
        let reopened = FileBlobStore::open(dir.path().join("nested")).unwrap();
        assert!(reopened.get("@RocketShoes:cart").unwrap().is_some());
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();

        let path = store.path_for("@RocketShoes:cart");
        assert_eq!(path.file_name().unwrap(), "_40RocketShoes_3Acart.json");

        let sneaky = store.path_for("../../etc/passwd");
        assert_eq!(sneaky.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_file_store_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();

        assert_ne!(store.path_for("a:b"), store.path_for("a_b"));
        assert_ne!(store.path_for("a_3Ab"), store.path_for("a:b"));

        store.set("a:b", "[1]").unwrap();
        store.set("a_b", "[2]").unwrap();
        assert_eq!(store.get("a:b").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        store.set("cart", "[]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["cart.json"]);
    }
}
