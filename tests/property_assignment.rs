//! Property tests for the assignment engine.

mod common;

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use vidpref::domain::models::Group;
use vidpref::domain::ports::VideoStore;
use vidpref::services::AssignmentEngine;

use common::{memory_tree, study_config};

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("clip{i:03}.mp4")).collect()
}

fn engine_for(names: &[String]) -> (AssignmentEngine, Arc<dyn VideoStore>) {
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let store: Arc<dyn VideoStore> = Arc::new(memory_tree(&refs));
    let engine = AssignmentEngine::new(store.clone(), study_config("/videos").study);
    (engine, store)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

proptest! {
    /// Property: the same (group, seed) always yields the same assignment
    #[test]
    fn prop_assignment_is_deterministic(count in 1usize..40, seed in any::<u64>(), group in 1u8..=3) {
        let (engine, _) = engine_for(&names(count));
        let group = Group::try_from(group).unwrap();

        let (first, second) = runtime().block_on(async {
            (
                engine.build(group, seed).await.unwrap(),
                engine.build(group, seed).await.unwrap(),
            )
        });

        prop_assert_eq!(&first[..], &second[..]);
    }

    /// Property: groups 1 and 2 are disjoint and together make up group 3
    #[test]
    fn prop_halves_partition_all(count in 1usize..40, seed in any::<u64>()) {
        let (engine, _) = engine_for(&names(count));

        let (first, second, all) = runtime().block_on(async {
            (
                engine.selected_videos(Group::FirstHalf, seed).await.unwrap(),
                engine.selected_videos(Group::SecondHalf, seed).await.unwrap(),
                engine.selected_videos(Group::All, seed).await.unwrap(),
            )
        });

        prop_assert_eq!(first.len(), count / 2);
        prop_assert_eq!(second.len(), count - count / 2);

        let first_set: HashSet<_> = first.iter().collect();
        prop_assert!(second.iter().all(|name| !first_set.contains(name)));

        let mut union: Vec<_> = first.into_iter().chain(second).collect();
        union.sort();
        let mut all = all;
        all.sort();
        prop_assert_eq!(union, all);
    }

    /// Property: every triple points at three existing files and the set is
    /// sorted by filename
    #[test]
    fn prop_triples_exist_and_are_sorted(count in 1usize..40, seed in any::<u64>(), group in 1u8..=3) {
        let (engine, store) = engine_for(&names(count));
        let group = Group::try_from(group).unwrap();

        runtime().block_on(async {
            let set = engine.build(group, seed).await.unwrap();
            for triple in set.iter() {
                assert!(store.exists(&triple.source_path).await);
                assert!(store.exists(&triple.reference_path).await);
                assert!(store.exists(&triple.baseline_path).await);
            }
            assert!(set.windows(2).all(|w| w[0].filename <= w[1].filename));
        });
    }
}
