//! Character progression: XP and gold accrual, stat growth, level-ups
//!
//! All arithmetic is clamped; no operation here can fail or leave the
//! character outside its invariants.

use tracing::debug;

use super::events::{GameEvent, LevelUp};
use crate::domain::{Character, Quest};

/// Amounts granted by a reward operation, for UI reporting
#[derive(Debug, Clone, Default)]
pub struct RewardResult {
    pub xp: u32,
    pub gold: u32,
    pub level_ups: Vec<LevelUp>,
}

/// Owns every mutation of the character's progression numbers
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine;

impl ProgressionEngine {
    pub fn new() -> Self {
        Self
    }

    /// XP a quest pays this character: base reward, doubled when the quest
    /// category's primary stat matches the class's primary stat.
    pub fn quest_xp(&self, character: &Character, quest: &Quest) -> u32 {
        let mut xp = quest.xp_reward();
        if let Some(class) = character.class {
            if quest.category.primary_stat() == class.primary_stat() {
                xp *= 2;
            }
        }
        xp
    }

    /// Grant the full reward for completing a quest: XP, gold, +1 to the
    /// category's primary and secondary stats, a small heal, then any
    /// level-ups the XP caused.
    pub fn grant_quest_reward(&self, character: &mut Character, quest: &Quest) -> RewardResult {
        let xp = self.quest_xp(character, quest);
        let gold = quest.gold_reward();

        character.xp += xp;
        character.gold += gold;
        character.stats.raise(quest.category.primary_stat(), 1);
        character.stats.raise(quest.category.secondary_stat(), 1);
        character.health = (character.health + 5).min(character.max_health);

        let level_ups = self.resolve_level_ups(character);
        debug!(xp, gold, level_ups = level_ups.len(), "quest reward granted");

        RewardResult { xp, gold, level_ups }
    }

    /// Exact inverse of [`grant_quest_reward`](Self::grant_quest_reward)
    /// for the xp/gold/stat delta, clamped at the floors (xp/gold at 0,
    /// stats at 1). Level-ups, healing, streak and counters stay.
    pub fn revert_quest_reward(&self, character: &mut Character, quest: &Quest) {
        let xp = self.quest_xp(character, quest);
        let gold = quest.gold_reward();

        character.xp = character.xp.saturating_sub(xp);
        character.gold = character.gold.saturating_sub(gold);
        character.stats.lower(quest.category.primary_stat(), 1);
        character.stats.lower(quest.category.secondary_stat(), 1);
        debug!(xp, gold, "quest reward reverted");
    }

    /// Pro-rata XP for finishing one subtask of `quest`
    pub fn grant_subtask_reward(&self, character: &mut Character, quest: &Quest) -> RewardResult {
        if quest.subtasks.is_empty() {
            return RewardResult::default();
        }
        let xp = quest.difficulty.base_xp() / quest.subtasks.len() as u32;
        self.grant_xp(character, xp)
    }

    /// Grant raw XP and resolve any resulting level-ups
    pub fn grant_xp(&self, character: &mut Character, xp: u32) -> RewardResult {
        character.xp += xp;
        let level_ups = self.resolve_level_ups(character);
        RewardResult { xp, gold: 0, level_ups }
    }

    /// Drain XP overflow into levels.
    ///
    /// Each level: xp -= xp_to_next, level += 1, xp_to_next = level * 100,
    /// +10 max health with a full heal, and a gold bonus of level * 10.
    /// Idempotent once `xp < xp_to_next`. This is the only path by which
    /// level increases, and every XP-granting operation runs it.
    pub fn resolve_level_ups(&self, character: &mut Character) -> Vec<LevelUp> {
        let mut level_ups = Vec::new();

        while character.xp >= character.xp_to_next {
            let old_level = character.level;
            character.xp -= character.xp_to_next;
            character.level += 1;
            character.xp_to_next = character.level * 100;
            character.max_health += 10;
            character.health = character.max_health;
            character.gold += character.level * 10;

            debug!(old_level, new_level = character.level, "level up");
            level_ups.push(LevelUp {
                old_level,
                new_level: character.level,
            });
        }

        level_ups
    }

    /// Events for a reward, in the order they happened
    pub fn reward_events(result: &RewardResult, reason: &str) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if result.xp > 0 {
            events.push(GameEvent::XpGained {
                amount: result.xp,
                reason: reason.to_string(),
            });
        }
        if result.gold > 0 {
            events.push(GameEvent::GoldGained {
                amount: result.gold,
                reason: reason.to_string(),
            });
        }
        for lu in &result.level_ups {
            events.push(GameEvent::LevelUp(lu.clone()));
        }
        events
    }
}
