//! Evaluable units and the per-group sets built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::StudyError;

/// Rater group. Groups 1 and 2 split the shuffled reference videos in half,
/// group 3 sees all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Group {
    FirstHalf,
    SecondHalf,
    All,
}

impl Group {
    pub const fn id(self) -> u8 {
        match self {
            Self::FirstHalf => 1,
            Self::SecondHalf => 2,
            Self::All => 3,
        }
    }

    /// Slice of the shuffled file list this group evaluates.
    pub fn select<T>(self, shuffled: &[T]) -> &[T] {
        let mid = shuffled.len() / 2;
        match self {
            Self::FirstHalf => &shuffled[..mid],
            Self::SecondHalf => &shuffled[mid..],
            Self::All => shuffled,
        }
    }
}

impl TryFrom<u8> for Group {
    type Error = StudyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::FirstHalf),
            2 => Ok(Self::SecondHalf),
            3 => Ok(Self::All),
            other => Err(StudyError::InvalidGroup(other)),
        }
    }
}

impl From<Group> for u8 {
    fn from(group: Group) -> Self {
        group.id()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One source video, the reference output and one baseline output.
///
/// Only built when all three files exist in the video store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTriple {
    /// Reference filename without extension
    pub caption: String,
    /// Reference filename, extension included
    pub filename: String,
    pub source_path: PathBuf,
    pub reference_path: PathBuf,
    pub baseline_name: String,
    pub baseline_path: PathBuf,
}

impl VideoTriple {
    /// Task identity used to decide when a fresh orientation is drawn.
    pub fn task_key(&self) -> String {
        format!("{}_{}", self.caption, self.baseline_name)
    }
}

/// Ordered triples for one `(group, seed)` pair.
///
/// Clones share the same backing slice, so a session can hold on to it for
/// its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSet {
    group: Group,
    seed: u64,
    triples: Arc<[VideoTriple]>,
}

impl AssignmentSet {
    pub fn new(group: Group, seed: u64, triples: Vec<VideoTriple>) -> Self {
        Self {
            group,
            seed,
            triples: triples.into(),
        }
    }

    pub const fn group(&self) -> Group {
        self.group
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Deref for AssignmentSet {
    type Target = [VideoTriple];

    fn deref(&self) -> &Self::Target {
        &self.triples
    }
}
