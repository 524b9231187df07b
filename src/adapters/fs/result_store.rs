use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::ports::ResultStore;

/// Result blob store backed by a directory. Keys are relative paths under
/// the root; writes go through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct DirectoryResultStore {
    root: PathBuf,
}

impl DirectoryResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        (plain && !key.is_empty()).then(|| self.root.join(relative))
    }
}

#[async_trait]
impl ResultStore for DirectoryResultStore {
    async fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        let path = self
            .path_for(key)
            .ok_or_else(|| StudyError::read(key, "key must be a relative path"))?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudyError::read(key, e)),
        }
    }

    async fn write(&self, key: &str, contents: &[u8]) -> DomainResult<()> {
        let path = self
            .path_for(key)
            .ok_or_else(|| StudyError::write(key, "key must be a relative path"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StudyError::write(key, e))?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, contents)
            .await
            .map_err(|e| StudyError::write(key, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StudyError::write(key, e))?;

        debug!(key, bytes = contents.len(), "result log written");
        Ok(())
    }
}
