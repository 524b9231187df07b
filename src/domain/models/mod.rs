pub mod assignment;
pub mod config;
pub mod prompt;
pub mod session;
pub mod vote;

pub use assignment::{AssignmentSet, Group, VideoTriple};
pub use config::{
    BaselineConfig, Config, LoggingConfig, PromptsConfig, ResultsConfig, StudyConfig,
};
pub use prompt::PromptEntry;
pub use session::{Phase, RaterSession};
pub use vote::{Choice, Orientation, VoteRecord, DRAW};
