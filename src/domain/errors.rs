//! Domain errors for the preference study core.

use thiserror::Error;

/// Errors raised by the assignment engine, the session state machine and
/// the storage ports.
///
/// Every variant is meant to end up as a human-readable message in front of
/// the rater; none of them should take the process down.
#[derive(Debug, Error)]
pub enum StudyError {
    /// The video store is not usable for building a session
    /// (missing folder, no eligible files, no comparable pairs).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejected user input. The session is left untouched.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid group id: {0}. Must be 1, 2 or 3")]
    InvalidGroup(u8),

    #[error("Failed to read {key}: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Failed to save {key}: {reason}")]
    StorageWrite { key: String, reason: String },
}

impl StudyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn read(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::StorageRead {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::StorageWrite {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the rater can simply retry the action that produced this error.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

pub type DomainResult<T> = Result<T, StudyError>;
