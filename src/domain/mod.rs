//! Core domain types for Questforge

use thiserror::Error;

mod achievement;
mod character;
mod quest;
mod routine;
mod template;

pub use achievement::{Achievement, AchievementCategory, AchievementDef, ACHIEVEMENTS};
pub use character::{Background, Character, CharacterClass, CharacterTrait, Motivation, StatType, Stats};
pub use quest::{Difficulty, Quest, QuestId, Subtask, SubtaskId, TaskCategory, TimeSession};
pub use routine::{Routine, RoutineId, RoutineStep, RoutineStepId, RoutineType};
pub use template::{DailyQuestTemplate, TimeOfDay, TEMPLATES};

/// A domain enum could not be parsed from user input
#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
