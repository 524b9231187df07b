use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::ports::VideoStore;

/// Video tree on the local filesystem, rooted at an absolute path.
#[derive(Debug, Clone)]
pub struct LocalVideoStore {
    root: PathBuf,
}

impl LocalVideoStore {
    /// Roots the store at `root`, made absolute against the working directory.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            root: std::path::absolute(root)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl VideoStore for LocalVideoStore {
    async fn list_files(&self, folder: &str) -> DomainResult<Option<Vec<String>>> {
        let dir = self.root.join(folder);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StudyError::read(dir.display().to_string(), e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StudyError::read(dir.display().to_string(), e))?
        {
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(Some(names))
    }

    fn resolve(&self, folder: &str, filename: &str) -> PathBuf {
        self.root.join(folder).join(filename)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn read_bytes(&self, path: &Path) -> DomainResult<Vec<u8>> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| StudyError::read(path.display().to_string(), e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "video loaded");
        Ok(bytes)
    }
}
