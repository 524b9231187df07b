//! In-memory adapters for the storage ports.
//!
//! Used by tests and by dry runs that should not touch disk.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::ports::{ResultStore, VideoStore};

/// Read-only video tree held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVideoStore {
    root: PathBuf,
    folders: BTreeSet<String>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl InMemoryVideoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Adds an empty folder.
    #[must_use]
    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folders.insert(folder.to_string());
        self
    }

    /// Adds a file, creating its folder.
    #[must_use]
    pub fn with_file(mut self, folder: &str, filename: &str, bytes: Vec<u8>) -> Self {
        self.folders.insert(folder.to_string());
        let path = self.resolve(folder, filename);
        self.files.insert(path, bytes);
        self
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn list_files(&self, folder: &str) -> DomainResult<Option<Vec<String>>> {
        if !self.folders.contains(folder) {
            return Ok(None);
        }
        let dir = self.root.join(folder);
        let names = self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir.as_path()))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        Ok(Some(names))
    }

    fn resolve(&self, folder: &str, filename: &str) -> PathBuf {
        self.root.join(folder).join(filename)
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    async fn read_bytes(&self, path: &Path) -> DomainResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StudyError::read(path.display().to_string(), "no such video"))
    }
}

/// Result blobs held in memory, with switchable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing_writes: Arc<AtomicUsize>,
    failing_reads: Arc<AtomicUsize>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` writes fail with `StorageWrite`.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Makes the next `count` reads fail with `StorageRead`.
    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    /// Stored blob as UTF-8 text.
    pub async fn contents(&self, key: &str) -> Option<String> {
        self.blobs
            .read()
            .await
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.blobs.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Stores a blob directly, bypassing failure injection.
    pub async fn put(&self, key: &str, contents: impl Into<Vec<u8>>) {
        self.blobs.write().await.insert(key.to_string(), contents.into());
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        if Self::take_failure(&self.failing_reads) {
            return Err(StudyError::read(key, "injected read failure"));
        }
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, contents: &[u8]) -> DomainResult<()> {
        if Self::take_failure(&self.failing_writes) {
            return Err(StudyError::write(key, "injected write failure"));
        }
        self.blobs
            .write()
            .await
            .insert(key.to_string(), contents.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_video_store_lists_only_direct_children() {
        let store = InMemoryVideoStore::new("/v")
            .with_file("ours", "a.mp4", vec![1])
            .with_file("ours", "b.mp4", vec![2, 3])
            .with_file("src", "a.mp4", vec![4])
            .with_folder("empty");

        let mut names = store.list_files("ours").await.unwrap().unwrap();
        names.sort();
        assert_eq!(names, ["a.mp4", "b.mp4"]);
        assert_eq!(store.list_files("empty").await.unwrap(), Some(vec![]));
        assert_eq!(store.list_files("missing").await.unwrap(), None);

        let path = store.resolve("ours", "b.mp4");
        assert!(store.exists(&path).await);
        assert_eq!(store.read_bytes(&path).await.unwrap(), vec![2, 3]);
        assert!(store.read_bytes(Path::new("/v/ours/zzz.mp4")).await.is_err());
    }

    #[tokio::test]
    async fn test_result_store_failure_injection() {
        let store = InMemoryResultStore::new();
        store.fail_next_writes(1);

        assert!(store.write("k", b"one").await.is_err());
        assert!(store.write("k", b"two").await.is_ok());
        assert_eq!(store.contents("k").await.as_deref(), Some("two"));

        store.fail_next_reads(1);
        assert!(store.read("k").await.is_err());
        assert_eq!(store.read("k").await.unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.read("other").await.unwrap(), None);
    }
}
