//! Quest lifecycle orchestration
//!
//! The single entry point for every state-changing operation. Owns the
//! character, the quest/routine arenas, and the collaborating engines
//! (progression, streak, achievements, time estimation), all injected at
//! construction. Operations take `now` explicitly so callers (and tests)
//! control time.
//!
//! Error philosophy: silent guards, not errors. Operations on unknown
//! ids, double completions, and expired grace windows are no-ops.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate};
use tracing::{debug, info};

use super::estimate::{TimeEstimateHistory, TimeEstimateSuggestion};
use super::evaluator::AchievementEvaluator;
use super::events::GameEvent;
use super::progression::ProgressionEngine;
use super::streak::StreakTracker;
use crate::domain::{
    Background, Character, CharacterClass, CharacterTrait, DailyQuestTemplate, Motivation, Quest,
    QuestId, Routine, RoutineId, RoutineStepId, SubtaskId, TaskCategory, TimeSession,
};

/// How long after completion a quest can still be reactivated
const GRACE_WINDOW: Duration = Duration::hours(1);

/// Daily quests older than this are pruned on rotation
const DAILY_RETENTION_DAYS: i64 = 7;

/// Everything the player chooses at character creation
#[derive(Debug, Clone)]
pub struct CharacterSpec {
    pub name: String,
    pub class: CharacterClass,
    pub background: Background,
    pub traits: Vec<CharacterTrait>,
    pub motivation: Motivation,
    pub daily_quest_ids: Vec<String>,
}

/// Orchestrates quest/subtask/routine state transitions
pub struct QuestLifecycle {
    character: Character,
    quests: HashMap<QuestId, Quest>,
    routines: HashMap<RoutineId, Routine>,
    estimates: TimeEstimateHistory,
    streak: StreakTracker,
    evaluator: AchievementEvaluator,
    progression: ProgressionEngine,
    /// The one quest currently being timed, if any
    active_timer: Option<QuestId>,
    /// Use the fantasy-flavored template titles for daily quests
    pub epic_titles: bool,
}

impl QuestLifecycle {
    /// Fresh session with a blank character
    pub fn new(today: NaiveDate) -> Self {
        Self::from_parts(
            Character::default(),
            Vec::new(),
            Vec::new(),
            TimeEstimateHistory::default(),
            StreakTracker::new(today),
            AchievementEvaluator::new(),
        )
    }

    /// Reassemble a session from persisted parts
    pub fn from_parts(
        character: Character,
        quests: Vec<Quest>,
        routines: Vec<Routine>,
        estimates: TimeEstimateHistory,
        streak: StreakTracker,
        evaluator: AchievementEvaluator,
    ) -> Self {
        Self {
            character,
            quests: quests.into_iter().map(|q| (q.id, q)).collect(),
            routines: routines.into_iter().map(|r| (r.id, r)).collect(),
            estimates,
            streak,
            evaluator,
            progression: ProgressionEngine::new(),
            active_timer: None,
            epic_titles: true,
        }
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.get(&id)
    }

    /// All quests, newest first
    pub fn quests(&self) -> Vec<&Quest> {
        let mut all: Vec<&Quest> = self.quests.values().collect();
        all.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        all
    }

    pub fn active_quests(&self) -> Vec<&Quest> {
        self.quests().into_iter().filter(|q| !q.is_completed).collect()
    }

    pub fn routines(&self) -> Vec<&Routine> {
        let mut all: Vec<&Routine> = self.routines.values().collect();
        all.sort_by(|a, b| a.created_date.cmp(&b.created_date));
        all
    }

    pub fn routine(&self, id: RoutineId) -> Option<&Routine> {
        self.routines.get(&id)
    }

    pub fn estimates(&self) -> &TimeEstimateHistory {
        &self.estimates
    }

    pub fn streak_tracker(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn evaluator(&self) -> &AchievementEvaluator {
        &self.evaluator
    }

    pub fn active_timer(&self) -> Option<QuestId> {
        self.active_timer
    }

    fn completions_on(&self, day: NaiveDate) -> usize {
        self.quests
            .values()
            .filter(|q| q.completed_at.map(|at| at.date_naive() == day).unwrap_or(false))
            .count()
    }

    pub fn completed_today(&self, now: DateTime<Local>) -> usize {
        self.completions_on(now.date_naive())
    }

    // ========================================
    // CHARACTER CREATION
    // ========================================

    /// Create the character: applies class, background and trait bonuses,
    /// records the class for collection achievements, and seeds today's
    /// daily quests.
    pub fn create_character(&mut self, spec: CharacterSpec, now: DateTime<Local>) {
        self.character.name = spec.name;
        self.character.class = Some(spec.class);
        self.character.background = Some(spec.background);
        self.character.traits = spec.traits;
        self.character.motivation = Some(spec.motivation);
        self.character.daily_quest_ids = spec.daily_quest_ids.into_iter().collect();

        for &(stat, bonus) in spec.class.stat_bonuses() {
            self.character.stats.raise(stat, bonus);
        }
        for &(stat, bonus) in spec.background.stat_bonuses() {
            self.character.stats.raise(stat, bonus);
        }
        self.character.apply_trait_bonuses();
        self.character.unique_classes_played.insert(spec.class);

        info!(name = %self.character.name, class = %spec.class, "character created");
        self.refresh_daily_quests(now);
    }

    // ========================================
    // QUEST OPERATIONS
    // ========================================

    pub fn add_quest(&mut self, quest: Quest) -> QuestId {
        let id = quest.id;
        debug!(%id, title = %quest.title, "quest added");
        self.quests.insert(id, quest);
        id
    }

    /// Open a tracking timer on a quest. No-op if the quest doesn't exist
    /// or already has an open timer.
    pub fn start_tracking(&mut self, id: QuestId, now: DateTime<Local>) {
        let Some(quest) = self.quests.get_mut(&id) else {
            return;
        };
        if quest.started_at.is_some() {
            return;
        }
        quest.started_at = Some(now);
        self.active_timer = Some(id);
        debug!(%id, "tracking started");
    }

    /// Close the open timer: appends a session and accumulates the spent
    /// minutes. No-op without an open timer.
    pub fn stop_tracking(&mut self, id: QuestId, now: DateTime<Local>) {
        let Some(quest) = self.quests.get_mut(&id) else {
            return;
        };
        let Some(started_at) = quest.started_at.take() else {
            return;
        };

        let session = TimeSession {
            start_time: started_at,
            end_time: now,
        };
        quest.actual_time_spent += session.duration_minutes();
        quest.sessions.push(session);

        if self.active_timer == Some(id) {
            self.active_timer = None;
        }
        debug!(%id, minutes = quest.actual_time_spent, "tracking stopped");
    }

    /// Flip a subtask. Completing one grants a pro-rata XP slice of the
    /// parent's base XP; un-toggling grants nothing back, and finishing
    /// every subtask does not complete the parent quest.
    pub fn toggle_subtask(
        &mut self,
        quest_id: QuestId,
        subtask_id: SubtaskId,
        now: DateTime<Local>,
    ) -> Vec<GameEvent> {
        let Some(quest) = self.quests.get_mut(&quest_id) else {
            return Vec::new();
        };
        let Some(subtask) = quest.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return Vec::new();
        };

        subtask.is_completed = !subtask.is_completed;
        subtask.completed_at = subtask.is_completed.then_some(now);

        if !subtask.is_completed {
            return Vec::new();
        }

        let result = self
            .progression
            .grant_subtask_reward(&mut self.character, quest);
        let mut events = ProgressionEngine::reward_events(&result, "Subtask completed");
        events.extend(self.evaluator.check_level(self.character.level, now));
        events
    }

    /// Complete a quest and grant everything that follows from it:
    /// rewards, estimate learning, counters, streak, achievements.
    /// No-op if the quest is unknown or already completed.
    pub fn complete(&mut self, id: QuestId, now: DateTime<Local>) -> Vec<GameEvent> {
        let Some(quest) = self.quests.get_mut(&id) else {
            return Vec::new();
        };
        if quest.is_completed {
            return Vec::new();
        }

        quest.is_completed = true;
        quest.completed_at = Some(now);
        let completed = quest.clone();
        info!(%id, title = %completed.title, "quest completed");

        if completed.actual_time_spent > 0 {
            self.estimates.record_completion(
                completed.category,
                completed.estimated_time,
                completed.actual_time_spent,
            );
        }

        let result = self
            .progression
            .grant_quest_reward(&mut self.character, &completed);
        let mut events = vec![GameEvent::QuestCompleted {
            xp: result.xp,
            gold: result.gold,
        }];
        events.extend(ProgressionEngine::reward_events(&result, "Quest completed"));

        self.character.total_quests_completed += 1;
        self.character
            .quest_categories_completed
            .insert(completed.category);

        let today = now.date_naive();
        let completions_today = self.completions_on(today);
        let streak_events =
            self.streak
                .on_quest_completed(&mut self.character, completions_today, today);
        let milestone_hit = !streak_events.is_empty();
        events.extend(streak_events);
        if milestone_hit {
            // Milestone bonuses add raw XP; drain any overflow.
            for lu in self.progression.resolve_level_ups(&mut self.character) {
                events.push(GameEvent::LevelUp(lu));
            }
        }

        events.extend(self.evaluator.check_quest(self.character.total_quests_completed, now));
        events.extend(self.evaluator.check_streak(self.character.streak, now));
        events.extend(self.evaluator.check_level(self.character.level, now));
        events.extend(self.evaluator.check_collection(
            self.character.unique_classes_played.len() as u32,
            self.character.quest_categories_completed.len() as u32,
            now,
        ));

        events
    }

    /// Undo a completion inside the grace window: reverses the xp/gold/
    /// stat delta and reopens the quest. Outside the window this is a
    /// silent no-op. Estimate history and streak state are deliberately
    /// left as they are.
    pub fn reactivate(&mut self, id: QuestId, now: DateTime<Local>) {
        let Some(quest) = self.quests.get_mut(&id) else {
            return;
        };
        let Some(completed_at) = quest.completed_at else {
            return;
        };
        if !quest.is_completed || now - completed_at >= GRACE_WINDOW {
            return;
        }

        quest.is_completed = false;
        quest.completed_at = None;
        let snapshot = quest.clone();
        self.progression
            .revert_quest_reward(&mut self.character, &snapshot);
        info!(%id, "quest reactivated");
    }

    /// Daily rotation: prune daily quests past the retention window and,
    /// if today has none yet, instantiate one per selected template.
    /// Idempotent; run once per app activation.
    pub fn refresh_daily_quests(&mut self, now: DateTime<Local>) {
        let today = now.date_naive();

        self.quests.retain(|_, q| {
            !q.is_daily || (today - q.created_date.date_naive()).num_days() <= DAILY_RETENTION_DAYS
        });

        let has_today = self
            .quests
            .values()
            .any(|q| q.is_daily && q.created_date.date_naive() == today);
        if has_today {
            return;
        }

        let epic = self.epic_titles;
        let template_ids: Vec<String> = self.character.daily_quest_ids.iter().cloned().collect();
        for template_id in template_ids {
            if let Some(template) = DailyQuestTemplate::get(&template_id) {
                let quest = Quest::from_template(template, epic, now);
                debug!(template = template.id, "daily quest created");
                self.quests.insert(quest.id, quest);
            }
        }
    }

    // ========================================
    // STREAK & FOCUS
    // ========================================

    /// Day-boundary streak reconciliation; run once per session/day change
    pub fn check_streak(&mut self, now: DateTime<Local>) -> Option<GameEvent> {
        let today = now.date_naive();
        let yesterday = today.pred_opt()?;
        let completed_yesterday = self.completions_on(yesterday) > 0;
        self.streak
            .check_and_update(&mut self.character, completed_yesterday, today)
    }

    /// Record a finished focus session
    pub fn add_focus_minutes(&mut self, minutes: u32, now: DateTime<Local>) -> Vec<GameEvent> {
        self.character.total_focus_minutes += minutes;
        self.evaluator
            .check_focus(minutes, self.character.total_focus_minutes, now)
    }

    /// Adjusted duration suggestion for a new quest
    pub fn suggest_time(&self, category: TaskCategory, original_estimate: u32) -> TimeEstimateSuggestion {
        self.estimates.suggest(category, original_estimate)
    }

    // ========================================
    // ROUTINES
    // ========================================

    pub fn add_routine(&mut self, routine: Routine) -> RoutineId {
        let id = routine.id;
        self.routines.insert(id, routine);
        id
    }

    /// Flip a routine step for today. Completing a step grants a small XP
    /// bump; completing the last required step completes the routine
    /// itself (bigger reward, per-routine streak, counts as a quest).
    /// Un-toggling grants nothing back.
    pub fn toggle_routine_step(
        &mut self,
        routine_id: RoutineId,
        step_id: RoutineStepId,
        now: DateTime<Local>,
    ) -> Vec<GameEvent> {
        let today = now.date_naive();
        let Some(routine) = self.routines.get_mut(&routine_id) else {
            return Vec::new();
        };
        let Some(step) = routine.steps.iter_mut().find(|s| s.id == step_id) else {
            return Vec::new();
        };

        if step.is_completed_on(today) {
            step.mark_incomplete(today);
            return Vec::new();
        }
        step.mark_completed(now);

        let result = self.progression.grant_xp(&mut self.character, 5);
        let mut events = ProgressionEngine::reward_events(&result, "Routine step");

        if routine.all_required_steps_done(today) && !routine.is_completed_on(today) {
            // Per-routine day streak: extended when yesterday was the last
            // full completion, otherwise restarted.
            let previous = routine.last_completed_date.map(|at| at.date_naive());
            routine.completion_streak = match previous {
                Some(day) if today.pred_opt() == Some(day) => routine.completion_streak + 1,
                Some(day) if day == today => routine.completion_streak,
                _ => 1,
            };
            routine.last_completed_date = Some(now);
            let name = routine.name.clone();
            let streak = routine.completion_streak;
            info!(routine = %name, streak, "routine completed");

            self.character.gold += 10;
            let result = self.progression.grant_xp(&mut self.character, 25);
            events.push(GameEvent::RoutineCompleted { name, streak });
            events.push(GameEvent::GoldGained {
                amount: 10,
                reason: "Routine completed".to_string(),
            });
            events.extend(ProgressionEngine::reward_events(&result, "Routine completed"));

            self.character.total_quests_completed += 1;
            events.extend(self.evaluator.check_quest(self.character.total_quests_completed, now));
        }

        events.extend(self.evaluator.check_level(self.character.level, now));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, RoutineStep, RoutineType, Subtask};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn session(now: DateTime<Local>) -> QuestLifecycle {
        let mut lifecycle = QuestLifecycle::new(now.date_naive());
        lifecycle.create_character(
            CharacterSpec {
                name: "Robin".to_string(),
                class: CharacterClass::Ranger,
                background: Background::Student,
                traits: vec![],
                motivation: Motivation::Balanced,
                daily_quest_ids: vec![],
            },
            now,
        );
        lifecycle
    }

    fn add_quest(lifecycle: &mut QuestLifecycle, now: DateTime<Local>) -> QuestId {
        lifecycle.add_quest(Quest::new(
            "Clean the kitchen",
            TaskCategory::LifeSkills,
            Difficulty::Medium,
            30,
            now,
        ))
    }

    #[test]
    fn double_completion_is_a_noop() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        assert!(!lifecycle.complete(id, now).is_empty());
        let xp = lifecycle.character().xp;
        assert!(lifecycle.complete(id, now).is_empty());
        assert_eq!(lifecycle.character().xp, xp);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let ghost = uuid::Uuid::new_v4();

        assert!(lifecycle.complete(ghost, now).is_empty());
        lifecycle.reactivate(ghost, now);
        lifecycle.start_tracking(ghost, now);
        assert!(lifecycle.toggle_subtask(ghost, uuid::Uuid::new_v4(), now).is_empty());
    }

    #[test]
    fn reactivate_within_grace_window_reverses_rewards() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        let xp_before = lifecycle.character().xp;
        let gold_before = lifecycle.character().gold;
        lifecycle.complete(id, now);
        lifecycle.reactivate(id, now + Duration::minutes(59));

        let quest = lifecycle.quest(id).unwrap();
        assert!(!quest.is_completed);
        assert!(quest.completed_at.is_none());
        assert_eq!(lifecycle.character().xp, xp_before);
        assert_eq!(lifecycle.character().gold, gold_before);
    }

    #[test]
    fn reactivate_after_grace_window_is_ignored() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        lifecycle.complete(id, now);
        let xp = lifecycle.character().xp;
        lifecycle.reactivate(id, now + Duration::minutes(61));

        assert!(lifecycle.quest(id).unwrap().is_completed);
        assert_eq!(lifecycle.character().xp, xp);
    }

    #[test]
    fn tracking_accumulates_sessions() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        lifecycle.start_tracking(id, now);
        assert_eq!(lifecycle.active_timer(), Some(id));
        lifecycle.stop_tracking(id, now + Duration::minutes(25));
        lifecycle.start_tracking(id, now + Duration::minutes(60));
        lifecycle.stop_tracking(id, now + Duration::minutes(70));

        let quest = lifecycle.quest(id).unwrap();
        assert_eq!(quest.actual_time_spent, 35);
        assert_eq!(quest.sessions.len(), 2);
        assert_eq!(lifecycle.active_timer(), None);
    }

    #[test]
    fn stop_without_open_timer_is_a_noop() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        lifecycle.stop_tracking(id, now);
        assert!(lifecycle.quest(id).unwrap().sessions.is_empty());
    }

    #[test]
    fn completion_with_tracked_time_feeds_estimates() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);

        lifecycle.start_tracking(id, now);
        lifecycle.stop_tracking(id, now + Duration::minutes(45));
        lifecycle.complete(id, now + Duration::minutes(46));

        let data = lifecycle.estimates().category(TaskCategory::LifeSkills);
        assert_eq!(data.task_count, 1);
        assert_eq!(data.total_estimated, 30);
        assert_eq!(data.total_actual, 45);
    }

    #[test]
    fn untracked_completion_leaves_estimates_alone() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let id = add_quest(&mut lifecycle, now);
        lifecycle.complete(id, now);
        assert_eq!(lifecycle.estimates().total_tasks_tracked, 0);
    }

    #[test]
    fn subtask_completion_grants_xp_but_never_reverses() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);
        let mut quest = Quest::new("Essay", TaskCategory::Academic, Difficulty::Hard, 60, now);
        quest.subtasks = vec![Subtask::new("outline", 10, 0), Subtask::new("draft", 30, 1)];
        let subtask_id = quest.subtasks[0].id;
        let id = lifecycle.add_quest(quest);

        lifecycle.toggle_subtask(id, subtask_id, now);
        assert_eq!(lifecycle.character().xp, 50); // 100 / 2

        // Un-toggle: XP stays (no reversal path for subtasks)
        lifecycle.toggle_subtask(id, subtask_id, now);
        assert_eq!(lifecycle.character().xp, 50);
        assert!(!lifecycle.quest(id).unwrap().subtasks[0].is_completed);

        // Parent quest is still active even with all subtasks done
        let other = lifecycle.quest(id).unwrap().subtasks[1].id;
        lifecycle.toggle_subtask(id, subtask_id, now);
        lifecycle.toggle_subtask(id, other, now);
        assert!(!lifecycle.quest(id).unwrap().is_completed);
    }

    #[test]
    fn daily_rotation_prunes_and_instantiates() {
        let now = at(2025, 6, 2, 8, 0);
        let mut lifecycle = QuestLifecycle::new(now.date_naive());
        lifecycle.create_character(
            CharacterSpec {
                name: "Robin".to_string(),
                class: CharacterClass::Ranger,
                background: Background::Student,
                traits: vec![],
                motivation: Motivation::Balanced,
                daily_quest_ids: vec!["make_bed".to_string(), "study_session".to_string()],
            },
            now,
        );

        let dailies: Vec<_> = lifecycle.quests().into_iter().filter(|q| q.is_daily).collect();
        assert_eq!(dailies.len(), 2);

        // Second refresh on the same day adds nothing
        lifecycle.refresh_daily_quests(now + Duration::hours(2));
        assert_eq!(lifecycle.quests().iter().filter(|q| q.is_daily).count(), 2);

        // Eight days later the stale dailies are pruned and new ones made
        let later = now + Duration::days(8);
        lifecycle.refresh_daily_quests(later);
        let dailies: Vec<_> = lifecycle.quests().into_iter().filter(|q| q.is_daily).collect();
        assert_eq!(dailies.len(), 2);
        assert!(dailies.iter().all(|q| q.created_date.date_naive() == later.date_naive()));
    }

    #[test]
    fn focus_minutes_accumulate_and_unlock() {
        let now = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(now);

        let events = lifecycle.add_focus_minutes(60, now);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::AchievementUnlocked(def) if def.key == "focus_60")));
        assert_eq!(lifecycle.character().total_focus_minutes, 60);

        for _ in 0..4 {
            lifecycle.add_focus_minutes(60, now);
        }
        assert_eq!(lifecycle.character().total_focus_minutes, 300);
        let unlocked: Vec<_> = lifecycle
            .evaluator()
            .achievements()
            .iter()
            .filter(|a| a.is_unlocked)
            .map(|a| a.key.clone())
            .collect();
        assert!(unlocked.contains(&"focus_total_300".to_string()));
    }

    #[test]
    fn routine_completion_awards_and_streaks() {
        let now = at(2025, 6, 2, 7, 0);
        let mut lifecycle = session(now);
        let mut routine = Routine::new("Morning", RoutineType::Morning, now);
        routine.steps = vec![
            RoutineStep::new("Brush teeth", "🪥", 3, 0),
            RoutineStep::new("Shower", "🚿", 10, 1),
        ];
        let step_ids: Vec<_> = routine.steps.iter().map(|s| s.id).collect();
        let id = lifecycle.add_routine(routine);

        let gold_before = lifecycle.character().gold;
        lifecycle.toggle_routine_step(id, step_ids[0], now);
        assert_eq!(lifecycle.character().xp, 5);

        let events = lifecycle.toggle_routine_step(id, step_ids[1], now);
        assert!(events.iter().any(|e| matches!(e, GameEvent::RoutineCompleted { .. })));
        assert_eq!(lifecycle.character().xp, 35); // 5 + 5 + 25
        assert_eq!(lifecycle.character().gold, gold_before + 10);
        assert_eq!(lifecycle.routine(id).unwrap().completion_streak, 1);
        assert_eq!(lifecycle.character().total_quests_completed, 1);

        // Next day extends the routine streak
        let tomorrow = now + Duration::days(1);
        lifecycle.toggle_routine_step(id, step_ids[0], tomorrow);
        lifecycle.toggle_routine_step(id, step_ids[1], tomorrow);
        assert_eq!(lifecycle.routine(id).unwrap().completion_streak, 2);
    }

    #[test]
    fn streak_advances_once_per_day_across_completions() {
        let day1 = at(2025, 6, 2, 10, 0);
        let mut lifecycle = session(day1);

        let a = add_quest(&mut lifecycle, day1);
        let b = add_quest(&mut lifecycle, day1);
        lifecycle.complete(a, day1);
        lifecycle.complete(b, day1 + Duration::minutes(5));
        assert_eq!(lifecycle.character().streak, 1);

        let day2 = day1 + Duration::days(1);
        let c = add_quest(&mut lifecycle, day2);
        lifecycle.complete(c, day2);
        assert_eq!(lifecycle.character().streak, 2);
    }
}
