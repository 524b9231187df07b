//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the study core needs from the outside:
//! - VideoStore: listing and reading the backing video tree
//! - ResultStore: whole-blob reads and writes of session logs
//! - PromptLookup: prompt text for an edited video
//!
//! Adapters in `crate::adapters` implement them for the local filesystem and
//! for memory.

pub mod prompt_lookup;
pub mod result_store;
pub mod video_store;

pub use prompt_lookup::PromptLookup;
pub use result_store::ResultStore;
pub use video_store::VideoStore;
