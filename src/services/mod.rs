//! Study services: assignment, prompt lookup, result recording and the
//! session flow that ties them together.

pub mod assignment_engine;
pub mod prompt_index;
pub mod result_recorder;
pub mod study_service;

pub use assignment_engine::AssignmentEngine;
pub use prompt_index::PromptIndex;
pub use result_recorder::ResultRecorder;
pub use study_service::{CompletionSummary, StudyService, TaskView, VideoSlot, VoteOutcome};
