//! Rater session state.
//!
//! A `RaterSession` lives only in memory for the duration of one rater's
//! run. The presentation shell owns it and hands it to the study service for
//! every transition; losing it loses the rater's position but never a vote
//! that was already written.

use chrono::{DateTime, Local};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::assignment::{AssignmentSet, Group, VideoTriple};
use super::vote::Orientation;

/// Where a rater is in the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No session yet; waiting for code and name
    Login,
    /// Judging pairs
    Evaluating,
    /// Every pair in the assignment has been judged
    Complete,
}

impl Phase {
    /// Phase for an optional session; no session means the login screen.
    pub fn of(session: Option<&RaterSession>) -> Self {
        session.map_or(Self::Login, RaterSession::phase)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Evaluating => write!(f, "evaluating"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Cached A/B placement for one task identity.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskOrientation {
    task_key: String,
    orientation: Orientation,
}

/// One rater's run through an assignment set.
#[derive(Debug, Clone)]
pub struct RaterSession {
    session_id: String,
    group: Group,
    rater_name: String,
    started_at: DateTime<Local>,
    assignment: AssignmentSet,
    task_index: usize,
    current: Option<TaskOrientation>,
    rng: ChaCha8Rng,
    votes_recorded: usize,
    votes_lost: usize,
}

impl RaterSession {
    /// Starts a session at task 0.
    ///
    /// `orientation_seed` drives the per-task coin flips; callers pass OS
    /// entropy in production and a fixed value when replaying.
    pub fn new(
        group: Group,
        rater_name: impl Into<String>,
        assignment: AssignmentSet,
        started_at: DateTime<Local>,
        orientation_seed: u64,
    ) -> Self {
        let rater_name = rater_name.into();
        Self {
            session_id: Self::session_id_for(started_at, &rater_name),
            group,
            rater_name,
            started_at,
            assignment,
            task_index: 0,
            current: None,
            rng: ChaCha8Rng::seed_from_u64(orientation_seed),
            votes_recorded: 0,
            votes_lost: 0,
        }
    }

    /// `"{%Y-%m-%d_%H-%M-%S}_{name}"`.
    ///
    /// Every name character other than alphanumerics, `-` and `.` becomes
    /// `_`, so the id is always a single path component.
    pub fn session_id_for(started_at: DateTime<Local>, rater_name: &str) -> String {
        let name: String = rater_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}", started_at.format("%Y-%m-%d_%H-%M-%S"), name)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub const fn group(&self) -> Group {
        self.group
    }

    pub fn rater_name(&self) -> &str {
        &self.rater_name
    }

    pub const fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub const fn assignment(&self) -> &AssignmentSet {
        &self.assignment
    }

    pub const fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn total_tasks(&self) -> usize {
        self.assignment.len()
    }

    pub const fn votes_recorded(&self) -> usize {
        self.votes_recorded
    }

    pub const fn votes_lost(&self) -> usize {
        self.votes_lost
    }

    pub fn phase(&self) -> Phase {
        if self.task_index >= self.assignment.len() {
            Phase::Complete
        } else {
            Phase::Evaluating
        }
    }

    pub fn current_triple(&self) -> Option<&VideoTriple> {
        self.assignment.get(self.task_index)
    }

    /// Orientation of the current task, flipping a fresh coin only when the
    /// task identity differs from the last one seen.
    pub fn current_orientation(&mut self) -> Option<Orientation> {
        let key = self.current_triple()?.task_key();
        match &self.current {
            Some(cached) if cached.task_key == key => Some(cached.orientation),
            _ => {
                let orientation = Orientation::from_coin(self.rng.random_bool(0.5));
                self.current = Some(TaskOrientation {
                    task_key: key,
                    orientation,
                });
                Some(orientation)
            }
        }
    }

    /// Moves past the current task. `persisted` feeds the completion summary.
    pub(crate) fn advance(&mut self, persisted: bool) {
        if persisted {
            self.votes_recorded += 1;
        } else {
            self.votes_lost += 1;
        }
        self.task_index += 1;
    }

    /// Result log name: `"{prefix}{group}_{session_id}.csv"`.
    pub fn log_key(&self, test_id_prefix: &str) -> String {
        format!("{test_id_prefix}{}_{}.csv", self.group.id(), self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn triple(caption: &str, baseline: &str) -> VideoTriple {
        VideoTriple {
            caption: caption.to_string(),
            filename: format!("{caption}.mp4"),
            source_path: PathBuf::from(format!("/v/src/{caption}.mp4")),
            reference_path: PathBuf::from(format!("/v/ours/{caption}.mp4")),
            baseline_name: baseline.to_string(),
            baseline_path: PathBuf::from(format!("/v/{baseline}/{caption}.mp4")),
        }
    }

    fn session(triples: Vec<VideoTriple>) -> RaterSession {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        RaterSession::new(
            Group::All,
            "Jo Smith",
            AssignmentSet::new(Group::All, 0, triples),
            started,
            42,
        )
    }

    #[test]
    fn test_session_id_format() {
        let s = session(vec![]);
        assert_eq!(s.session_id(), "2024-03-09_14-05-07_Jo_Smith");
        assert_eq!(s.log_key("testID"), "testID3_2024-03-09_14-05-07_Jo_Smith.csv");
    }

    #[test]
    fn test_session_id_replaces_path_characters() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            RaterSession::session_id_for(started, "Jo/../x"),
            "2024-03-09_14-05-07_Jo_.._x"
        );
        assert_eq!(
            RaterSession::session_id_for(started, r"R&D\QA:1"),
            "2024-03-09_14-05-07_R_D_QA_1"
        );
        assert_eq!(
            RaterSession::session_id_for(started, "Zoë-B"),
            "2024-03-09_14-05-07_Zoë-B"
        );
    }

    #[test]
    fn test_empty_assignment_is_complete() {
        let s = session(vec![]);
        assert_eq!(s.phase(), Phase::Complete);
        assert!(s.current_triple().is_none());
    }

    #[test]
    fn test_phase_of_none_is_login() {
        assert_eq!(Phase::of(None), Phase::Login);
        let s = session(vec![triple("bear", "no_prune")]);
        assert_eq!(Phase::of(Some(&s)), Phase::Evaluating);
    }

    #[test]
    fn test_orientation_stable_for_same_task() {
        let mut s = session(vec![triple("bear", "no_prune"), triple("car", "no_prune")]);
        let first = s.current_orientation().unwrap();
        for _ in 0..20 {
            assert_eq!(s.current_orientation(), Some(first));
        }
    }

    #[test]
    fn test_orientation_redrawn_on_new_task() {
        let triples: Vec<_> = (0..64).map(|i| triple(&format!("v{i:02}"), "no_prune")).collect();
        let mut s = session(triples);
        let mut seen_a = false;
        let mut seen_b = false;
        while s.phase() == Phase::Evaluating {
            match s.current_orientation().unwrap() {
                Orientation::ReferenceIsA => seen_a = true,
                Orientation::BaselineIsA => seen_b = true,
            }
            s.advance(true);
        }
        assert!(seen_a && seen_b, "64 fair coin flips should land both ways");
        assert_eq!(s.votes_recorded(), 64);
    }

    #[test]
    fn test_same_seed_same_orientations() {
        let triples: Vec<_> = (0..8).map(|i| triple(&format!("v{i}"), "no_prune")).collect();
        let mut a = session(triples.clone());
        let mut b = session(triples);
        for _ in 0..8 {
            assert_eq!(a.current_orientation(), b.current_orientation());
            a.advance(true);
            b.advance(false);
        }
        assert_eq!(b.votes_lost(), 8);
    }
}
