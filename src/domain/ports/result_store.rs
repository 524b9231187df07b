//! Result log storage port (trait) for dependency injection.
//!
//! A durable key-value blob store. Logs are read and written whole; the
//! recorder layers the read-modify-write cycle on top.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Reads the full contents stored under `key`
    ///
    /// Implementations must not serve this from a cache: a stale read here
    /// drops the votes appended since.
    ///
    /// # Returns
    /// - `Some(bytes)` if the blob exists
    /// - `None` if it does not
    ///
    /// # Errors
    /// Returns `StorageRead` if the blob exists but cannot be read
    async fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>>;

    /// Replaces the contents stored under `key`
    ///
    /// # Errors
    /// Returns `StorageWrite` on any failure
    async fn write(&self, key: &str, contents: &[u8]) -> DomainResult<()>;
}
