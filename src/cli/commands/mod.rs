//! CLI command implementations.

pub mod assign;
pub mod init;
pub mod prompt;
pub mod run;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::adapters::{DirectoryResultStore, LocalVideoStore};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{PromptIndex, StudyService};

/// Load configuration from `path`, or from `.vidpref/` and the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the study service to the local video tree and results directory.
pub async fn build_service(config: &Config) -> Result<StudyService> {
    let videos = LocalVideoStore::new(&config.study.video_base_path).with_context(|| {
        format!(
            "Failed to resolve video base path {}",
            config.study.video_base_path.display()
        )
    })?;
    let results = DirectoryResultStore::new(&config.results.dir);
    let prompts = PromptIndex::load_or_empty(&config.prompts.path).await;

    Ok(StudyService::new(
        config,
        Arc::new(videos),
        Arc::new(results),
        Arc::new(prompts),
    ))
}
