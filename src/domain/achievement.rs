//! Achievement catalog and unlock state
//!
//! The catalog is static configuration; per-achievement progress and
//! unlock state is the only mutable part and is persisted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Achievement grouping for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Quests,
    Streak,
    Level,
    Focus,
    Collection,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quests => "Quests",
            Self::Streak => "Streaks",
            Self::Level => "Levels",
            Self::Focus => "Focus",
            Self::Collection => "Collection",
        }
    }
}

/// Static definition of one achievement
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub required_value: u32,
    pub category: AchievementCategory,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    // Quests
    AchievementDef {
        key: "first_quest",
        title: "First Steps",
        description: "Complete your first quest",
        icon: "🎯",
        required_value: 1,
        category: AchievementCategory::Quests,
    },
    AchievementDef {
        key: "quest_10",
        title: "Adventurer",
        description: "Complete 10 quests",
        icon: "⚔️",
        required_value: 10,
        category: AchievementCategory::Quests,
    },
    AchievementDef {
        key: "quest_50",
        title: "Quest Master",
        description: "Complete 50 quests",
        icon: "🗡️",
        required_value: 50,
        category: AchievementCategory::Quests,
    },
    AchievementDef {
        key: "quest_100",
        title: "Legendary Hero",
        description: "Complete 100 quests",
        icon: "🏆",
        required_value: 100,
        category: AchievementCategory::Quests,
    },
    // Streaks
    AchievementDef {
        key: "streak_3",
        title: "Warming Up",
        description: "Maintain a 3-day streak",
        icon: "🔥",
        required_value: 3,
        category: AchievementCategory::Streak,
    },
    AchievementDef {
        key: "streak_7",
        title: "Week Warrior",
        description: "Maintain a 7-day streak",
        icon: "🔥🔥",
        required_value: 7,
        category: AchievementCategory::Streak,
    },
    AchievementDef {
        key: "streak_30",
        title: "Unstoppable",
        description: "Maintain a 30-day streak",
        icon: "🔥🔥🔥",
        required_value: 30,
        category: AchievementCategory::Streak,
    },
    // Levels
    AchievementDef {
        key: "level_5",
        title: "Rising Star",
        description: "Reach level 5",
        icon: "⭐",
        required_value: 5,
        category: AchievementCategory::Level,
    },
    AchievementDef {
        key: "level_10",
        title: "Seasoned Adventurer",
        description: "Reach level 10",
        icon: "🌟",
        required_value: 10,
        category: AchievementCategory::Level,
    },
    AchievementDef {
        key: "level_25",
        title: "Epic Hero",
        description: "Reach level 25",
        icon: "💫",
        required_value: 25,
        category: AchievementCategory::Level,
    },
    // Focus
    AchievementDef {
        key: "focus_60",
        title: "Deep Focus",
        description: "Complete a 60-minute focus session",
        icon: "🧘",
        required_value: 60,
        category: AchievementCategory::Focus,
    },
    AchievementDef {
        key: "focus_total_300",
        title: "Focus Master",
        description: "Focus for 300 minutes total",
        icon: "🎯",
        required_value: 300,
        category: AchievementCategory::Focus,
    },
    AchievementDef {
        key: "focus_total_1000",
        title: "Zen Master",
        description: "Focus for 1000 minutes total",
        icon: "🧘‍♂️",
        required_value: 1000,
        category: AchievementCategory::Focus,
    },
    // Collection
    AchievementDef {
        key: "all_classes",
        title: "Jack of All Trades",
        description: "Try 6 different character classes",
        icon: "🎭",
        required_value: 6,
        category: AchievementCategory::Collection,
    },
    AchievementDef {
        key: "all_categories",
        title: "Renaissance Soul",
        description: "Complete quests in all 6 categories",
        icon: "🌈",
        required_value: 6,
        category: AchievementCategory::Collection,
    },
];

impl AchievementDef {
    /// Look up a definition by key
    pub fn get(key: &str) -> Option<&'static AchievementDef> {
        ACHIEVEMENTS.iter().find(|a| a.key == key)
    }

    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

/// Mutable unlock state for one achievement
///
/// The transition is one-way: once unlocked, never re-locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub key: String,
    pub is_unlocked: bool,
    pub unlocked_date: Option<DateTime<Local>>,
    /// Last counter value seen by the evaluator
    pub progress: u32,
}

impl Achievement {
    pub fn locked(key: &str) -> Self {
        Self {
            key: key.to_string(),
            is_unlocked: false,
            unlocked_date: None,
            progress: 0,
        }
    }

    pub fn def(&self) -> Option<&'static AchievementDef> {
        AchievementDef::get(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<_> = ACHIEVEMENTS.iter().map(|a| a.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(AchievementDef::get("streak_7").unwrap().required_value, 7);
        assert!(AchievementDef::get("nope").is_none());
    }
}
