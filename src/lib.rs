//! vidpref - Pairwise video preference study runner
//!
//! Raters log in with a shared code, are assigned a deterministic subset of
//! reference videos, and judge each reference edit against one or more
//! baseline edits in a blinded A/B comparison. Every vote is appended to a
//! per-session CSV log.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and storage ports
//! - **Service Layer** (`services`): Prompt index, assignment engine,
//!   result recorder and the session-driving study service
//! - **Adapters** (`adapters`): Filesystem and in-memory port implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, setup
//! - **CLI Layer** (`cli`): Command-line interface and the rating shell
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vidpref::adapters::{DirectoryResultStore, LocalVideoStore};
//! use vidpref::domain::models::{Choice, Config};
//! use vidpref::services::{PromptIndex, StudyService};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::default();
//! let service = StudyService::new(
//!     &config,
//!     Arc::new(LocalVideoStore::new(&config.study.video_base_path)?),
//!     Arc::new(DirectoryResultStore::new(&config.results.dir)),
//!     Arc::new(PromptIndex::load_or_empty(&config.prompts.path).await),
//! );
//!
//! let mut session = service.login("1111", "Jo").await?;
//! while let Some(task) = service.current_task(&mut session) {
//!     service.submit_vote(&mut session, task.index, Some(Choice::Draw)).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AssignmentSet, Choice, Config, Group, Orientation, Phase, RaterSession, VideoTriple,
    VoteRecord,
};
pub use domain::ports::{PromptLookup, ResultStore, VideoStore};
pub use domain::{DomainResult, StudyError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AssignmentEngine, PromptIndex, ResultRecorder, StudyService};
