//! Deterministic pair assignment.
//!
//! For a `(group, seed)` pair the engine picks which reference videos a rater
//! judges and against which baselines:
//!
//! 1. list the reference folder, keep eligible videos, sort by name
//! 2. shuffle with ChaCha8 seeded from `seed`
//! 3. take the group's half (or everything for group 3)
//! 4. emit one triple per baseline whose output exists
//! 5. sort the triples by filename
//!
//! The shuffle only decides membership; presentation order is alphabetical.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::models::{AssignmentSet, Group, StudyConfig, VideoTriple};
use crate::domain::ports::VideoStore;

/// Builds assignment sets from the video store.
pub struct AssignmentEngine {
    store: Arc<dyn VideoStore>,
    study: StudyConfig,
}

impl AssignmentEngine {
    pub fn new(store: Arc<dyn VideoStore>, study: StudyConfig) -> Self {
        Self { store, study }
    }

    pub const fn study(&self) -> &StudyConfig {
        &self.study
    }

    /// Reference video filenames in canonical (sorted) order.
    ///
    /// # Errors
    /// Returns `Configuration` if the reference folder is missing or holds no
    /// eligible videos.
    pub async fn reference_videos(&self) -> DomainResult<Vec<String>> {
        let folder = &self.study.reference_method;
        let Some(files) = self.store.list_files(folder).await? else {
            return Err(StudyError::configuration(format!(
                "Could not find folder: {}",
                self.store.resolve(folder, "").display()
            )));
        };

        let mut videos: Vec<String> = files
            .into_iter()
            .filter(|name| self.is_eligible(name))
            .collect();

        if videos.is_empty() {
            return Err(StudyError::configuration(format!(
                "No .{} files found in folder: {}",
                self.study.video_extension,
                self.store.resolve(folder, "").display()
            )));
        }

        videos.sort();
        Ok(videos)
    }

    /// Reference filenames selected for `group`, in shuffle order.
    pub async fn selected_videos(&self, group: Group, seed: u64) -> DomainResult<Vec<String>> {
        let mut videos = self.reference_videos().await?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        videos.shuffle(&mut rng);
        Ok(group.select(&videos).to_vec())
    }

    /// Builds the ordered triples for `(group, seed)`.
    ///
    /// # Errors
    /// Returns `Configuration` if the reference folder is missing or empty.
    #[instrument(skip(self), fields(reference = %self.study.reference_method), err)]
    pub async fn build(&self, group: Group, seed: u64) -> DomainResult<AssignmentSet> {
        let selected = self.selected_videos(group, seed).await?;

        let mut triples = Vec::with_capacity(selected.len() * self.study.baselines.len());
        for filename in &selected {
            triples.extend(self.triples_for(filename).await);
        }
        triples.sort_by(|a, b| a.filename.cmp(&b.filename));

        debug!(
            group = group.id(),
            seed,
            selected = selected.len(),
            triples = triples.len(),
            "assignment built"
        );
        Ok(AssignmentSet::new(group, seed, triples))
    }

    async fn triples_for(&self, filename: &str) -> Vec<VideoTriple> {
        let reference_path = self.store.resolve(&self.study.reference_method, filename);
        let source_path = self.store.resolve(&self.study.source_folder, filename);

        if !self.store.exists(&source_path).await {
            warn!(filename, path = %source_path.display(), "source video missing, skipping");
            return Vec::new();
        }

        let mut triples = Vec::new();
        for baseline in &self.study.baselines {
            let baseline_path = self.store.resolve(&baseline.folder, filename);
            if self.store.exists(&baseline_path).await {
                triples.push(VideoTriple {
                    caption: self.caption(filename),
                    filename: filename.to_string(),
                    source_path: source_path.clone(),
                    reference_path: reference_path.clone(),
                    baseline_name: baseline.name.clone(),
                    baseline_path,
                });
            } else {
                debug!(filename, baseline = %baseline.name, "baseline output missing");
            }
        }
        triples
    }

    fn is_eligible(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext == self.study.video_extension.as_str())
    }

    fn caption(&self, filename: &str) -> String {
        let suffix = format!(".{}", self.study.video_extension);
        filename
            .strip_suffix(&suffix)
            .unwrap_or(filename)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryVideoStore;
    use crate::domain::models::BaselineConfig;

    fn study() -> StudyConfig {
        StudyConfig {
            video_base_path: "/videos".into(),
            reference_method: "ours".to_string(),
            source_folder: "src".to_string(),
            video_extension: "mp4".to_string(),
            seed: 0,
            baselines: vec![BaselineConfig {
                name: "no_prune".to_string(),
                folder: "no_prune".to_string(),
            }],
        }
    }

    fn store_with(names: &[&str], folders: &[&str]) -> InMemoryVideoStore {
        let mut store = InMemoryVideoStore::new("/videos");
        for folder in folders {
            for name in names {
                store = store.with_file(folder, name, b"mp4".to_vec());
            }
        }
        store
    }

    #[tokio::test]
    async fn test_group_all_sorted_by_filename() {
        let store = store_with(&["b.mp4", "a.mp4", "c.mp4", "d.mp4"], &["ours", "src", "no_prune"]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let set = engine.build(Group::All, 0).await.unwrap();
        let names: Vec<_> = set.iter().map(|t| t.filename.as_str()).collect();
        assert_eq!(names, ["a.mp4", "b.mp4", "c.mp4", "d.mp4"]);
        assert_eq!(set[0].caption, "a");
        assert_eq!(set[0].baseline_name, "no_prune");
        assert_eq!(set[0].reference_path, Path::new("/videos/ours/a.mp4"));
        assert_eq!(set[0].source_path, Path::new("/videos/src/a.mp4"));
        assert_eq!(set[0].baseline_path, Path::new("/videos/no_prune/a.mp4"));
    }

    #[tokio::test]
    async fn test_ignores_other_extensions() {
        let store = store_with(&["a.mp4", "notes.txt", "b.mp4.bak"], &["ours", "src", "no_prune"]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        assert_eq!(engine.reference_videos().await.unwrap(), ["a.mp4"]);
    }

    #[tokio::test]
    async fn test_missing_folder_is_configuration_error() {
        let store = InMemoryVideoStore::new("/videos");
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let err = engine.build(Group::All, 0).await.unwrap_err();
        assert!(matches!(err, StudyError::Configuration(ref m) if m.contains("Could not find folder")));
    }

    #[tokio::test]
    async fn test_no_videos_is_configuration_error() {
        let store = store_with(&["readme.txt"], &["ours"]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let err = engine.build(Group::FirstHalf, 0).await.unwrap_err();
        assert!(matches!(err, StudyError::Configuration(ref m) if m.contains("No .mp4 files")));
    }

    #[tokio::test]
    async fn test_missing_baseline_output_skipped() {
        let store = store_with(&["a.mp4", "b.mp4"], &["ours", "src"]).with_file("no_prune", "b.mp4", vec![]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let set = engine.build(Group::All, 0).await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].filename, "b.mp4");
    }

    #[tokio::test]
    async fn test_missing_source_skipped() {
        let store = store_with(&["a.mp4", "b.mp4"], &["ours", "no_prune"]).with_file("src", "a.mp4", vec![]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let set = engine.build(Group::All, 0).await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].filename, "a.mp4");
    }

    #[tokio::test]
    async fn test_multiple_baselines_keep_config_order() {
        let store = store_with(&["a.mp4", "b.mp4"], &["ours", "src", "no_prune", "streamv2v"]);
        let mut config = study();
        config.baselines.push(BaselineConfig {
            name: "streamv2v".to_string(),
            folder: "streamv2v".to_string(),
        });
        let engine = AssignmentEngine::new(Arc::new(store), config);

        let set = engine.build(Group::All, 0).await.unwrap();
        let pairs: Vec<_> = set
            .iter()
            .map(|t| (t.filename.as_str(), t.baseline_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("a.mp4", "no_prune"),
                ("a.mp4", "streamv2v"),
                ("b.mp4", "no_prune"),
                ("b.mp4", "streamv2v"),
            ]
        );
    }

    #[tokio::test]
    async fn test_halves_partition_full_set() {
        let names: Vec<String> = (0..11).map(|i| format!("clip{i:02}.mp4")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = store_with(&refs, &["ours", "src", "no_prune"]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let first = engine.selected_videos(Group::FirstHalf, 7).await.unwrap();
        let second = engine.selected_videos(Group::SecondHalf, 7).await.unwrap();
        let all = engine.selected_videos(Group::All, 7).await.unwrap();

        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 6);
        assert!(first.iter().all(|f| !second.contains(f)));
        let mut union: Vec<_> = first.into_iter().chain(second).collect();
        union.sort();
        let mut all_sorted = all;
        all_sorted.sort();
        assert_eq!(union, all_sorted);
    }

    #[tokio::test]
    async fn test_seed_changes_split() {
        let names: Vec<String> = (0..20).map(|i| format!("clip{i:02}.mp4")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = store_with(&refs, &["ours", "src", "no_prune"]);
        let engine = AssignmentEngine::new(Arc::new(store), study());

        let a = engine.selected_videos(Group::FirstHalf, 0).await.unwrap();
        let b = engine.selected_videos(Group::FirstHalf, 0).await.unwrap();
        let c = engine.selected_videos(Group::FirstHalf, 1).await.unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
