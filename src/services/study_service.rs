//! Study service driving a rater session from login to completion.
//!
//! The service holds no per-rater state. The presentation shell owns the
//! `RaterSession` and passes it into every call; the service decides the
//! transitions and talks to the storage ports.
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainResult, StudyError};
use crate::domain::models::{
    Choice, Config, Group, Orientation, Phase, RaterSession, VideoTriple, VoteRecord,
};
use crate::domain::ports::{PromptLookup, ResultStore, VideoStore};
use crate::services::{AssignmentEngine, ResultRecorder};

const INVALID_LOGIN: &str = "Invalid Test ID or Name. Please try again.";
const NO_SELECTION: &str = "Please select an option.";

/// One of the two candidate videos on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSlot {
    pub path: PathBuf,
    pub method: String,
}

/// Everything the shell needs to render the current comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub total: usize,
    pub triple: VideoTriple,
    pub orientation: Orientation,
    pub video_a: VideoSlot,
    pub video_b: VideoSlot,
    pub prompt: Option<String>,
}

impl TaskView {
    /// "Evaluation 3 of 20"
    pub fn progress_text(&self) -> String {
        format!("Evaluation {} of {}", self.index + 1, self.total)
    }

    /// "NO_PRUNE vs OURS"
    pub fn comparison_label(&self) -> String {
        format!("{} vs OURS", self.triple.baseline_name.to_uppercase())
    }
}

/// Result of an accepted vote.
#[derive(Debug)]
pub struct VoteOutcome {
    pub record: VoteRecord,
    /// False when the log write failed; the vote is lost but the session
    /// has still moved on.
    pub persisted: bool,
    pub warning: Option<StudyError>,
    pub phase: Phase,
}

impl VoteOutcome {
    pub fn saved_message(&self) -> String {
        format!("Saved! Winner: {}", self.record.chosen_method)
    }
}

/// Counts shown when a session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub total: usize,
    pub recorded: usize,
    pub lost: usize,
}

/// Coordinates assignment, orientation, recording and progress.
pub struct StudyService {
    engine: AssignmentEngine,
    recorder: ResultRecorder,
    prompts: Arc<dyn PromptLookup>,
    videos: Arc<dyn VideoStore>,
    login_codes: BTreeMap<String, u8>,
    reference_method: String,
    test_id_prefix: String,
    seed: u64,
}

impl StudyService {
    pub fn new(
        config: &Config,
        videos: Arc<dyn VideoStore>,
        results: Arc<dyn ResultStore>,
        prompts: Arc<dyn PromptLookup>,
    ) -> Self {
        Self {
            engine: AssignmentEngine::new(videos.clone(), config.study.clone()),
            recorder: ResultRecorder::new(results),
            prompts,
            videos,
            login_codes: config.login_codes.clone(),
            reference_method: config.study.reference_method.clone(),
            test_id_prefix: config.results.test_id_prefix.clone(),
            seed: config.study.seed,
        }
    }

    pub const fn engine(&self) -> &AssignmentEngine {
        &self.engine
    }

    pub const fn recorder(&self) -> &ResultRecorder {
        &self.recorder
    }

    /// Phase for the shell's current session slot.
    pub fn phase(session: Option<&RaterSession>) -> Phase {
        Phase::of(session)
    }

    /// Group routed to by a login code, surrounding whitespace ignored.
    pub fn group_for_code(&self, code: &str) -> DomainResult<Option<Group>> {
        self.login_codes
            .get(code.trim())
            .map(|&id| Group::try_from(id))
            .transpose()
    }

    /// Starts a session with a fresh random source for A/B placement.
    ///
    /// # Errors
    /// - `Validation` for an unknown code or blank name
    /// - `Configuration` when the video store yields nothing to compare
    pub async fn login(&self, code: &str, name: &str) -> DomainResult<RaterSession> {
        self.login_with_seed(code, name, rand::random()).await
    }

    /// [`StudyService::login`] with an explicit orientation seed.
    #[instrument(skip(self, code), err)]
    pub async fn login_with_seed(
        &self,
        code: &str,
        name: &str,
        orientation_seed: u64,
    ) -> DomainResult<RaterSession> {
        let name = name.trim();
        let group = match self.group_for_code(code)? {
            Some(group) if !name.is_empty() => group,
            _ => return Err(StudyError::validation(INVALID_LOGIN)),
        };

        let assignment = self.engine.build(group, self.seed).await?;
        if assignment.is_empty() {
            return Err(StudyError::configuration(format!(
                "No comparable video pairs for group {group}"
            )));
        }

        let session = RaterSession::new(group, name, assignment, Local::now(), orientation_seed);
        info!(
            session_id = session.session_id(),
            group = group.id(),
            tasks = session.total_tasks(),
            "rater session started"
        );
        Ok(session)
    }

    /// The comparison to show, or `None` once the session is complete.
    ///
    /// Calling this repeatedly for the same task returns the same A/B
    /// placement.
    pub fn current_task(&self, session: &mut RaterSession) -> Option<TaskView> {
        let orientation = session.current_orientation()?;
        let triple = session.current_triple()?.clone();

        let reference = VideoSlot {
            path: triple.reference_path.clone(),
            method: self.reference_method.clone(),
        };
        let baseline = VideoSlot {
            path: triple.baseline_path.clone(),
            method: triple.baseline_name.clone(),
        };
        let (video_a, video_b) = if orientation.reference_is_a() {
            (reference, baseline)
        } else {
            (baseline, reference)
        };

        Some(TaskView {
            index: session.task_index(),
            total: session.total_tasks(),
            prompt: self.prompts.lookup(&triple.caption).map(str::to_string),
            triple,
            orientation,
            video_a,
            video_b,
        })
    }

    /// Records the rater's choice for task `task_index` and moves on.
    ///
    /// `task_index` is the index the shell rendered; a mismatch means the
    /// form was submitted twice and is rejected without touching the log.
    /// A failed log write is returned as a warning in the outcome and the
    /// session still advances.
    ///
    /// # Errors
    /// `Validation` for a missing choice, a stale index or a completed
    /// session. The session is unchanged in every error case.
    #[instrument(skip(self, session), fields(session_id = session.session_id()), err)]
    pub async fn submit_vote(
        &self,
        session: &mut RaterSession,
        task_index: usize,
        choice: Option<Choice>,
    ) -> DomainResult<VoteOutcome> {
        if session.phase() == Phase::Complete {
            return Err(StudyError::validation("This session is already complete."));
        }
        if task_index != session.task_index() {
            return Err(StudyError::validation(
                "This comparison was already submitted.",
            ));
        }
        let Some(choice) = choice else {
            return Err(StudyError::validation(NO_SELECTION));
        };

        let orientation = session
            .current_orientation()
            .ok_or_else(|| StudyError::validation("This session is already complete."))?;
        let triple = session
            .current_triple()
            .ok_or_else(|| StudyError::validation("This session is already complete."))?;

        let chosen = orientation.resolve(choice, &self.reference_method, &triple.baseline_name);
        let record = VoteRecord::new(&triple.caption, &triple.baseline_name, chosen);
        let log_key = session.log_key(&self.test_id_prefix);

        let (persisted, warning) = match self.recorder.append(&log_key, record.clone()).await {
            Ok(_) => (true, None),
            Err(err) => {
                warn!(log_key, error = %err, "vote could not be saved");
                (false, Some(err))
            }
        };
        session.advance(persisted);

        Ok(VoteOutcome {
            record,
            persisted,
            warning,
            phase: session.phase(),
        })
    }

    /// Counts for the completion screen.
    pub fn summary(session: &RaterSession) -> CompletionSummary {
        CompletionSummary {
            total: session.total_tasks(),
            recorded: session.votes_recorded(),
            lost: session.votes_lost(),
        }
    }

    /// Drops the session so the shell returns to the login screen. Votes
    /// already written stay in their log.
    pub fn restart(&self, session: &mut Option<RaterSession>) {
        if let Some(ended) = session.take() {
            info!(
                session_id = ended.session_id(),
                completed = ended.task_index(),
                total = ended.total_tasks(),
                "rater session reset"
            );
        }
    }

    /// Reads a video for display.
    pub async fn load_video(&self, path: &Path) -> DomainResult<Vec<u8>> {
        self.videos.read_bytes(path).await
    }
}
