//! Events emitted by engine operations
//!
//! Purely informational: consumers use these for UI feedback and
//! animations; nothing feeds back into engine logic.

use crate::domain::AchievementDef;

/// A level-up that occurred while resolving XP overflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Everything that can happen as a side effect of a state-changing call
#[derive(Debug, Clone)]
pub enum GameEvent {
    XpGained { amount: u32, reason: String },
    GoldGained { amount: u32, reason: String },
    LevelUp(LevelUp),
    AchievementUnlocked(&'static AchievementDef),
    StreakExtended { days: u32 },
    StreakMilestone { days: u32, message: String },
    StreakLost { message: String },
    QuestCompleted { xp: u32, gold: u32 },
    RoutineCompleted { name: String, streak: u32 },
}
