//! Video store port (trait) for dependency injection.
//!
//! The store is a read-only tree laid out as `{base}/{folder}/{filename}`.
//! The core only lists folders, checks existence and reads bytes; it never
//! writes to the store.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainResult;

#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Lists file names directly inside `folder`
    ///
    /// # Returns
    /// - `Some(names)` in no particular order
    /// - `None` if the folder does not exist
    ///
    /// # Errors
    /// Returns `StorageRead` if the folder exists but cannot be listed
    async fn list_files(&self, folder: &str) -> DomainResult<Option<Vec<String>>>;

    /// Absolute location of `folder/filename` in this store
    fn resolve(&self, folder: &str, filename: &str) -> PathBuf;

    /// Whether a file exists at a path produced by [`VideoStore::resolve`]
    async fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file
    ///
    /// # Errors
    /// Returns `StorageRead` if the file is missing or unreadable
    async fn read_bytes(&self, path: &Path) -> DomainResult<Vec<u8>>;
}
