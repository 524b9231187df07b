//! Prompt index loaded from the prompt document.

use std::path::Path;
use tracing::{debug, warn};

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::models::PromptEntry;
use crate::domain::ports::PromptLookup;

/// In-memory prompt document with first-match substring lookup.
///
/// Matching replaces `-` with a space in each entry and checks whether the
/// video id occurs anywhere in it. Short ids can match the wrong entry; the
/// first entry in document order wins.
#[derive(Debug, Clone, Default)]
pub struct PromptIndex {
    entries: Vec<PromptEntry>,
}

impl PromptIndex {
    pub const fn new(entries: Vec<PromptEntry>) -> Self {
        Self { entries }
    }

    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parses a JSON array of prompt entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// Loads the prompt document at `path`.
    ///
    /// # Errors
    /// Returns `StorageRead` if the file is missing, unreadable or not a JSON
    /// array of objects.
    pub async fn load(path: &Path) -> DomainResult<Self> {
        let key = path.display().to_string();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StudyError::read(&key, e))?;
        let index = Self::from_json(&json).map_err(|e| StudyError::read(&key, e))?;
        debug!(path = %key, entries = index.len(), "prompt document loaded");
        Ok(index)
    }

    /// Like [`PromptIndex::load`], but a failure only costs the prompt text:
    /// it is logged and an empty index is returned.
    pub async fn load_or_empty(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, "prompt document unavailable, prompts will be missing");
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PromptLookup for PromptIndex {
    fn lookup(&self, video_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.edit_vid.replace('-', " ").contains(video_id))
            .map(|entry| entry.edit_vid.as_str())
    }
}
