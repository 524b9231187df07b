//! Common test utilities for integration tests
//!
//! Provides shared fixtures for building video trees and study
//! configurations.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use vidpref::adapters::{InMemoryResultStore, InMemoryVideoStore};
use vidpref::domain::models::{BaselineConfig, Config};
use vidpref::services::{PromptIndex, StudyService};

pub const REFERENCE: &str = "ours";
pub const SOURCE: &str = "src";
pub const BASELINE: &str = "no_prune";

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Study config for a tree with `ours`, `src` and `no_prune` folders
pub fn study_config(root: impl Into<PathBuf>) -> Config {
    let mut config = Config::default();
    config.study.video_base_path = root.into();
    config.study.reference_method = REFERENCE.to_string();
    config.study.source_folder = SOURCE.to_string();
    config.study.baselines = vec![BaselineConfig {
        name: BASELINE.to_string(),
        folder: BASELINE.to_string(),
    }];
    config
}

/// In-memory tree holding every name in the reference, source and baseline
/// folders
pub fn memory_tree(names: &[&str]) -> InMemoryVideoStore {
    let mut store = InMemoryVideoStore::new("/videos");
    for folder in [REFERENCE, SOURCE, BASELINE] {
        for name in names {
            store = store.with_file(folder, name, name.as_bytes().to_vec());
        }
    }
    store
}

/// Study service over an in-memory tree; also returns the result store
pub fn memory_service(
    names: &[&str],
    prompts: PromptIndex,
) -> (StudyService, Arc<InMemoryResultStore>) {
    let results = Arc::new(InMemoryResultStore::new());
    let service = StudyService::new(
        &study_config("/videos"),
        Arc::new(memory_tree(names)),
        results.clone(),
        Arc::new(prompts),
    );
    (service, results)
}

/// Write a video tree to disk under `root`
pub fn write_tree(root: &Path, names: &[&str]) {
    for folder in [REFERENCE, SOURCE, BASELINE] {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).expect("Failed to create video folder");
        for name in names {
            fs::write(dir.join(name), format!("{folder}/{name}")).expect("Failed to write video");
        }
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
