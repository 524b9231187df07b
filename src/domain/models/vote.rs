//! Votes, the rater's A/B choice and the per-task left/right placement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::StudyError;

/// Value recorded in `Chosen_Method` when the rater cannot decide.
pub const DRAW: &str = "draw";

/// One row of a session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(rename = "Caption")]
    pub caption: String,

    #[serde(rename = "Baseline_Method")]
    pub baseline_method: String,

    /// Reference method name, baseline name or [`DRAW`]
    #[serde(rename = "Chosen_Method")]
    pub chosen_method: String,
}

impl VoteRecord {
    pub fn new(
        caption: impl Into<String>,
        baseline_method: impl Into<String>,
        chosen_method: impl Into<String>,
    ) -> Self {
        Self {
            caption: caption.into(),
            baseline_method: baseline_method.into(),
            chosen_method: chosen_method.into(),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.chosen_method == DRAW
    }
}

/// The rater's answer for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    A,
    B,
    Draw,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "Video A"),
            Self::B => write!(f, "Video B"),
            Self::Draw => write!(f, "Draw"),
        }
    }
}

impl FromStr for Choice {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "video a" => Ok(Self::A),
            "b" | "video b" => Ok(Self::B),
            "d" | "draw" => Ok(Self::Draw),
            other => Err(StudyError::validation(format!(
                "Unknown option '{other}'. Choose A, B or Draw."
            ))),
        }
    }
}

/// Which output sits in the "Video A" slot for the current task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    ReferenceIsA,
    BaselineIsA,
}

impl Orientation {
    pub const fn from_coin(reference_is_a: bool) -> Self {
        if reference_is_a {
            Self::ReferenceIsA
        } else {
            Self::BaselineIsA
        }
    }

    pub const fn reference_is_a(self) -> bool {
        matches!(self, Self::ReferenceIsA)
    }

    /// Method name recorded for `choice`.
    pub fn resolve<'a>(self, choice: Choice, reference: &'a str, baseline: &'a str) -> &'a str {
        match (choice, self) {
            (Choice::Draw, _) => DRAW,
            (Choice::A, Self::ReferenceIsA) | (Choice::B, Self::BaselineIsA) => reference,
            (Choice::A, Self::BaselineIsA) | (Choice::B, Self::ReferenceIsA) => baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all_combinations() {
        let r = Orientation::ReferenceIsA;
        assert_eq!(r.resolve(Choice::A, "ours", "no_prune"), "ours");
        assert_eq!(r.resolve(Choice::B, "ours", "no_prune"), "no_prune");
        assert_eq!(r.resolve(Choice::Draw, "ours", "no_prune"), "draw");

        let b = Orientation::BaselineIsA;
        assert_eq!(b.resolve(Choice::A, "ours", "no_prune"), "no_prune");
        assert_eq!(b.resolve(Choice::B, "ours", "no_prune"), "ours");
        assert_eq!(b.resolve(Choice::Draw, "ours", "no_prune"), "draw");
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("a".parse::<Choice>().unwrap(), Choice::A);
        assert_eq!(" Video B ".parse::<Choice>().unwrap(), Choice::B);
        assert_eq!("D".parse::<Choice>().unwrap(), Choice::Draw);
        assert!(matches!(
            "c".parse::<Choice>(),
            Err(StudyError::Validation(_))
        ));
    }

    #[test]
    fn test_from_coin() {
        assert!(Orientation::from_coin(true).reference_is_a());
        assert!(!Orientation::from_coin(false).reference_is_a());
    }

    #[test]
    fn test_is_draw() {
        assert!(VoteRecord::new("bear", "no_prune", DRAW).is_draw());
        assert!(!VoteRecord::new("bear", "no_prune", "no_prune").is_draw());
    }
}
