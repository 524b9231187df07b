use serde::{Deserialize, Serialize};

/// One entry of the prompt document. Only `edit_vid` is read; any other
/// field in the document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Descriptive editing prompt, words joined by `-` in some documents
    #[serde(default)]
    pub edit_vid: String,
}
