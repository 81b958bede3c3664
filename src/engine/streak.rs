//! Day-granularity streak tracking
//!
//! The streak counter lives on the character; the tracker holds two day
//! markers: the last day reconciliation ran, and the last day the streak
//! actually advanced. They are distinct so a morning boundary check never
//! blocks that day's first completion from counting.
//!
//! Two entry points: a once-per-day boundary check and a hook on every
//! quest completion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::events::GameEvent;
use crate::domain::Character;

/// Gold/XP bonus for crossing a streak milestone, paid once per crossing
const MILESTONES: &[(u32, u32, u32, &str)] = &[
    (3, 25, 0, "3-day streak! You're building momentum! 🔥"),
    (7, 50, 100, "Week-long streak! Amazing consistency! 🔥🔥"),
    (14, 100, 200, "2-week streak! You're unstoppable! 🔥🔥🔥"),
    (30, 250, 500, "30-day streak! Legendary dedication! 🏆"),
];

/// Tracks the consecutive-day completion streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakTracker {
    /// Last day `check_and_update` reconciled
    pub last_check: NaiveDate,
    /// Last day the streak counter advanced
    #[serde(default)]
    pub last_streak_day: Option<NaiveDate>,
}

impl StreakTracker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            last_check: today,
            last_streak_day: None,
        }
    }

    /// Day-boundary reconciliation, run once per session/day change.
    ///
    /// `completed_yesterday` is whether any quest completed on the day
    /// immediately before `today`. A completion yesterday that was already
    /// counted preserves the streak; one that was never counted means the
    /// state is stale and resets silently. A gap of more than one day
    /// since the last check loses the streak with a notice.
    pub fn check_and_update(
        &mut self,
        character: &mut Character,
        completed_yesterday: bool,
        today: NaiveDate,
    ) -> Option<GameEvent> {
        if self.last_check == today {
            return None;
        }

        let yesterday = today.pred_opt();
        let mut event = None;

        if completed_yesterday {
            if self.last_streak_day != yesterday {
                character.streak = 0;
            }
        } else if (today - self.last_check).num_days() > 1 {
            character.streak = 0;
            info!("streak lost");
            event = Some(GameEvent::StreakLost {
                message: "Streak lost! Complete a quest to start a new one.".to_string(),
            });
        }

        self.last_check = today;
        event
    }

    /// Called on every quest completion. Advances the streak only on the
    /// first completion of a day that hasn't been counted yet; milestone
    /// bonuses are applied to the character directly (the caller resolves
    /// any level-ups).
    pub fn on_quest_completed(
        &mut self,
        character: &mut Character,
        completions_today: usize,
        today: NaiveDate,
    ) -> Vec<GameEvent> {
        if completions_today != 1 || self.last_streak_day == Some(today) {
            return Vec::new();
        }

        character.streak += 1;
        self.last_streak_day = Some(today);
        self.last_check = today;
        debug!(streak = character.streak, "streak advanced");

        let mut events = vec![GameEvent::StreakExtended {
            days: character.streak,
        }];

        if let Some(&(days, gold, xp, message)) =
            MILESTONES.iter().find(|(d, ..)| *d == character.streak)
        {
            character.gold += gold;
            character.xp += xp;
            info!(days, gold, xp, "streak milestone");
            events.push(GameEvent::StreakMilestone {
                days,
                message: message.to_string(),
            });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_completion_of_day_advances_streak() {
        let mut character = Character::default();
        let mut tracker = StreakTracker::new(day("2025-06-01"));

        let events = tracker.on_quest_completed(&mut character, 1, day("2025-06-02"));
        assert_eq!(character.streak, 1);
        assert!(matches!(events[0], GameEvent::StreakExtended { days: 1 }));
    }

    #[test]
    fn second_completion_same_day_does_not_double_increment() {
        let mut character = Character::default();
        let mut tracker = StreakTracker::new(day("2025-06-01"));

        tracker.on_quest_completed(&mut character, 1, day("2025-06-02"));
        let events = tracker.on_quest_completed(&mut character, 2, day("2025-06-02"));
        assert_eq!(character.streak, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn morning_check_does_not_block_first_completion() {
        let mut character = Character::default();
        let mut tracker = StreakTracker::new(day("2025-06-01"));

        // Boundary check runs before the day's first completion
        assert!(tracker
            .check_and_update(&mut character, false, day("2025-06-02"))
            .is_none());
        let events = tracker.on_quest_completed(&mut character, 1, day("2025-06-02"));
        assert_eq!(character.streak, 1);
        assert!(!events.is_empty());
    }

    #[test]
    fn week_milestone_pays_once() {
        let mut character = Character::default();
        character.streak = 6;
        character.gold = 0;
        let mut tracker = StreakTracker::new(day("2025-06-06"));
        tracker.last_streak_day = Some(day("2025-06-06"));

        let events = tracker.on_quest_completed(&mut character, 1, day("2025-06-07"));
        assert_eq!(character.streak, 7);
        assert_eq!(character.gold, 50);
        assert_eq!(character.xp, 100);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::StreakMilestone { days: 7, .. })));

        // Same-day repeat completion: no second payout
        let events = tracker.on_quest_completed(&mut character, 2, day("2025-06-07"));
        assert!(events.is_empty());
        assert_eq!(character.gold, 50);
    }

    #[test]
    fn gap_without_completion_loses_streak() {
        let mut character = Character::default();
        character.streak = 5;
        let mut tracker = StreakTracker::new(day("2025-06-01"));
        tracker.last_streak_day = Some(day("2025-06-01"));

        let event = tracker.check_and_update(&mut character, false, day("2025-06-04"));
        assert_eq!(character.streak, 0);
        assert!(matches!(event, Some(GameEvent::StreakLost { .. })));
        assert_eq!(tracker.last_check, day("2025-06-04"));
    }

    #[test]
    fn counted_yesterday_preserves_streak() {
        let mut character = Character::default();
        character.streak = 5;
        let mut tracker = StreakTracker::new(day("2025-06-03"));
        tracker.last_streak_day = Some(day("2025-06-03"));

        let event = tracker.check_and_update(&mut character, true, day("2025-06-04"));
        assert_eq!(character.streak, 5);
        assert!(event.is_none());
    }

    #[test]
    fn uncounted_completion_yesterday_resets_silently() {
        let mut character = Character::default();
        character.streak = 4;
        let mut tracker = StreakTracker::new(day("2025-06-01"));
        tracker.last_streak_day = Some(day("2025-06-01"));

        // A quest completed on 06-03 but the streak never advanced that
        // day; state is stale, reset without a loss notice.
        let event = tracker.check_and_update(&mut character, true, day("2025-06-04"));
        assert_eq!(character.streak, 0);
        assert!(event.is_none());
    }

    #[test]
    fn same_day_check_is_a_noop() {
        let mut character = Character::default();
        character.streak = 2;
        let mut tracker = StreakTracker::new(day("2025-06-03"));

        assert!(tracker
            .check_and_update(&mut character, false, day("2025-06-03"))
            .is_none());
        assert_eq!(character.streak, 2);
    }
}
