//! Achievement evaluation
//!
//! Stateless threshold checks over the static catalog, invoked after
//! every state-changing event. Unlocking is one-way and idempotent:
//! calling with the same or a lower value never re-locks or regresses
//! the unlock date.

use chrono::{DateTime, Local};
use tracing::info;

use super::events::GameEvent;
use crate::domain::{Achievement, ACHIEVEMENTS};

/// Holds the mutable unlock state for the whole catalog
#[derive(Debug, Clone)]
pub struct AchievementEvaluator {
    achievements: Vec<Achievement>,
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementEvaluator {
    /// Fresh state: every catalog entry locked
    pub fn new() -> Self {
        Self {
            achievements: ACHIEVEMENTS.iter().map(|d| Achievement::locked(d.key)).collect(),
        }
    }

    /// Rebuild from saved state. Saved entries keep their unlock state and
    /// progress; catalog entries missing from the save start locked, and
    /// saved keys no longer in the catalog are dropped.
    pub fn from_saved(saved: Vec<Achievement>) -> Self {
        let achievements = ACHIEVEMENTS
            .iter()
            .map(|def| {
                saved
                    .iter()
                    .find(|a| a.key == def.key)
                    .cloned()
                    .unwrap_or_else(|| Achievement::locked(def.key))
            })
            .collect();
        Self { achievements }
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Snapshot for persistence
    pub fn to_saved(&self) -> Vec<Achievement> {
        self.achievements.clone()
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_unlocked).count()
    }

    /// Update progress for one achievement and unlock it if the counter
    /// reached the required value. Safe to call redundantly.
    pub fn check(&mut self, key: &str, current_value: u32, now: DateTime<Local>) -> Option<GameEvent> {
        let entry = self.achievements.iter_mut().find(|a| a.key == key)?;
        let def = entry.def()?;

        // Progress only moves forward; redundant lower values are ignored.
        if current_value > entry.progress {
            entry.progress = current_value;
        }

        if !entry.is_unlocked && current_value >= def.required_value {
            entry.is_unlocked = true;
            entry.unlocked_date = Some(now);
            info!(key, "achievement unlocked");
            return Some(GameEvent::AchievementUnlocked(def));
        }
        None
    }

    fn check_group(
        &mut self,
        keys: &[&str],
        current_value: u32,
        now: DateTime<Local>,
    ) -> Vec<GameEvent> {
        keys.iter()
            .filter_map(|key| self.check(key, current_value, now))
            .collect()
    }

    /// Quest-count thresholds
    pub fn check_quest(&mut self, total_completed: u32, now: DateTime<Local>) -> Vec<GameEvent> {
        self.check_group(&["first_quest", "quest_10", "quest_50", "quest_100"], total_completed, now)
    }

    /// Streak-length thresholds
    pub fn check_streak(&mut self, current_streak: u32, now: DateTime<Local>) -> Vec<GameEvent> {
        self.check_group(&["streak_3", "streak_7", "streak_30"], current_streak, now)
    }

    /// Level thresholds
    pub fn check_level(&mut self, current_level: u32, now: DateTime<Local>) -> Vec<GameEvent> {
        self.check_group(&["level_5", "level_10", "level_25"], current_level, now)
    }

    /// Focus thresholds: one single-session check plus cumulative totals
    pub fn check_focus(
        &mut self,
        session_minutes: u32,
        total_minutes: u32,
        now: DateTime<Local>,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        events.extend(self.check("focus_60", session_minutes, now));
        events.extend(self.check_group(&["focus_total_300", "focus_total_1000"], total_minutes, now));
        events
    }

    /// Class/category diversity thresholds
    pub fn check_collection(
        &mut self,
        unique_classes: u32,
        categories_completed: u32,
        now: DateTime<Local>,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        events.extend(self.check("all_classes", unique_classes, now));
        events.extend(self.check("all_categories", categories_completed, now));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(evaluator: &'a AchievementEvaluator, key: &str) -> &'a Achievement {
        evaluator.achievements().iter().find(|a| a.key == key).unwrap()
    }

    #[test]
    fn unlocks_at_threshold() {
        let mut evaluator = AchievementEvaluator::new();
        let now = Local::now();

        assert!(evaluator.check_quest(0, now).is_empty());
        let events = evaluator.check_quest(1, now);
        assert_eq!(events.len(), 1);
        assert!(find(&evaluator, "first_quest").is_unlocked);
    }

    #[test]
    fn unlock_is_monotonic() {
        let mut evaluator = AchievementEvaluator::new();
        let now = Local::now();

        evaluator.check_streak(7, now);
        let unlocked_at = find(&evaluator, "streak_7").unlocked_date;
        assert!(find(&evaluator, "streak_7").is_unlocked);

        // Lower value later: still unlocked, date untouched, no new event
        let events = evaluator.check_streak(0, now + chrono::Duration::days(1));
        assert!(events.is_empty());
        let entry = find(&evaluator, "streak_7");
        assert!(entry.is_unlocked);
        assert_eq!(entry.unlocked_date, unlocked_at);
    }

    #[test]
    fn redundant_calls_emit_no_events() {
        let mut evaluator = AchievementEvaluator::new();
        let now = Local::now();

        assert_eq!(evaluator.check_level(5, now).len(), 1);
        assert!(evaluator.check_level(5, now).is_empty());
    }

    #[test]
    fn focus_session_and_total_are_independent() {
        let mut evaluator = AchievementEvaluator::new();
        let now = Local::now();

        let events = evaluator.check_focus(60, 60, now);
        assert_eq!(events.len(), 1); // focus_60 only
        let events = evaluator.check_focus(30, 300, now);
        assert_eq!(events.len(), 1); // focus_total_300 only
    }

    #[test]
    fn from_saved_merges_over_catalog() {
        let mut evaluator = AchievementEvaluator::new();
        let now = Local::now();
        evaluator.check_quest(10, now);

        let restored = AchievementEvaluator::from_saved(evaluator.to_saved());
        assert!(find(&restored, "quest_10").is_unlocked);
        assert_eq!(find(&restored, "quest_10").progress, 10);
        assert!(!find(&restored, "quest_100").is_unlocked);
        assert_eq!(restored.achievements().len(), ACHIEVEMENTS.len());
    }
}
