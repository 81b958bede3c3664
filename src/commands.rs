//! CLI command handlers
//!
//! Each handler loads the session, applies one engine operation, prints
//! what happened, and saves. Ids are matched by unique prefix so users
//! can type the first few characters shown in `list`.

use anyhow::{bail, Result};
use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::domain::{
    AchievementDef, Background, CharacterClass, CharacterTrait, DailyQuestTemplate, Difficulty,
    Motivation, Quest, QuestId, Routine, RoutineId, RoutineStep, RoutineType, StatType, Subtask,
    TaskCategory, TimeOfDay, TEMPLATES,
};
use crate::engine::{CharacterSpec, GameEvent, QuestLifecycle};
use crate::store::{GameData, JsonStore, Store};

/// A loaded game session bound to its save file
pub struct Session {
    store: JsonStore,
    pub lifecycle: QuestLifecycle,
}

impl Session {
    /// Load the saved session (or start fresh), run day-boundary
    /// housekeeping, and report anything it caused. The housekeeping
    /// result is saved immediately: rotated daily quests must keep the
    /// same ids on the next invocation.
    pub fn load(settings: &Settings, now: DateTime<Local>) -> Result<Self> {
        let store = JsonStore::new(&settings.save_path);
        let mut lifecycle = match store.load()? {
            Some(data) => data.into_lifecycle(),
            None => QuestLifecycle::new(now.date_naive()),
        };
        lifecycle.epic_titles = settings.epic_titles;

        if let Some(event) = lifecycle.check_streak(now) {
            print_events(&[event]);
        }
        lifecycle.refresh_daily_quests(now);

        let session = Self { store, lifecycle };
        session.save()?;
        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&GameData::snapshot(&self.lifecycle))
    }
}

fn print_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::XpGained { amount, reason } => println!("  +{amount} XP ({reason})"),
            GameEvent::GoldGained { amount, reason } => println!("  +{amount} gold ({reason})"),
            GameEvent::LevelUp(lu) => {
                println!("  🎉 Level up! {} -> {}", lu.old_level, lu.new_level)
            }
            GameEvent::AchievementUnlocked(def) => {
                println!("  🏅 Achievement unlocked: {} {} - {}", def.icon, def.title, def.description)
            }
            GameEvent::StreakExtended { days } => println!("  🔥 Streak: {days} day(s)"),
            GameEvent::StreakMilestone { message, .. } => println!("  {message}"),
            GameEvent::StreakLost { message } => println!("  💔 {message}"),
            GameEvent::QuestCompleted { xp, gold } => {
                println!("Quest complete! Earned {xp} XP and {gold} gold.")
            }
            GameEvent::RoutineCompleted { name, streak } => {
                println!("  ✅ Routine '{name}' complete ({streak} day streak)")
            }
        }
    }
}

fn short(id: QuestId) -> String {
    id.to_string()[..8].to_string()
}

fn resolve_quest(lifecycle: &QuestLifecycle, prefix: &str) -> Result<QuestId> {
    let matches: Vec<QuestId> = lifecycle
        .quests()
        .iter()
        .filter(|q| q.id.to_string().starts_with(prefix))
        .map(|q| q.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no quest matches '{prefix}'"),
        _ => bail!("'{prefix}' matches more than one quest, give more characters"),
    }
}

fn resolve_routine(lifecycle: &QuestLifecycle, prefix: &str) -> Result<RoutineId> {
    let matches: Vec<RoutineId> = lifecycle
        .routines()
        .iter()
        .filter(|r| r.id.to_string().starts_with(prefix) || r.name.eq_ignore_ascii_case(prefix))
        .map(|r| r.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no routine matches '{prefix}'"),
        _ => bail!("'{prefix}' matches more than one routine"),
    }
}

// ========================================
// CHARACTER
// ========================================

#[allow(clippy::too_many_arguments)]
pub fn create_character(
    session: &mut Session,
    name: String,
    class: CharacterClass,
    background: Background,
    motivation: Motivation,
    traits: Vec<CharacterTrait>,
    dailies: Vec<String>,
    now: DateTime<Local>,
) -> Result<()> {
    for id in &dailies {
        if DailyQuestTemplate::get(id).is_none() {
            bail!("unknown daily quest template '{id}' (see `questforge templates`)");
        }
    }

    session.lifecycle.create_character(
        CharacterSpec {
            name,
            class,
            background,
            traits,
            motivation,
            daily_quest_ids: dailies,
        },
        now,
    );
    session.save()?;

    let character = session.lifecycle.character();
    println!(
        "Welcome, {} the {}! Your adventure begins.",
        character.name,
        class.label()
    );
    Ok(())
}

pub fn status(session: &Session, now: DateTime<Local>) -> Result<()> {
    let character = session.lifecycle.character();

    println!("{}", character.name);
    if let Some(class) = character.class {
        println!("  {} {}", class.icon(), class.label());
    }
    println!(
        "  Level {}  ({} / {} XP)",
        character.level, character.xp, character.xp_to_next
    );
    println!("  ❤️ {} / {}   💰 {}", character.health, character.max_health, character.gold);
    println!("  🔥 {} day streak", character.streak);
    println!();
    for &stat in StatType::all() {
        println!(
            "  {} {:<13} {:>2} ({:+})",
            stat.icon(),
            stat.label(),
            character.stats[stat],
            character.stats.modifier(stat)
        );
    }
    println!();
    println!(
        "  Quests completed: {} ({} today)   Focus minutes: {}",
        character.total_quests_completed,
        session.lifecycle.completed_today(now),
        character.total_focus_minutes
    );

    let active = session.lifecycle.active_quests();
    if !active.is_empty() {
        println!();
        println!("Active quests:");
        for quest in active {
            let daily = if quest.is_daily { " (daily)" } else { "" };
            println!(
                "  [{}] {} {} - {} ({}m){}",
                short(quest.id),
                quest.category.icon(),
                quest.title,
                quest.difficulty.label(),
                quest.estimated_time,
                daily
            );
        }
    }
    Ok(())
}

// ========================================
// QUESTS
// ========================================

pub fn add_quest(
    session: &mut Session,
    title: String,
    category: TaskCategory,
    difficulty: Option<Difficulty>,
    estimated_time: u32,
    subtasks: Vec<String>,
    now: DateTime<Local>,
) -> Result<()> {
    // No explicit difficulty: fall back to the character's preference
    let difficulty = difficulty.unwrap_or(session.lifecycle.character().preferred_difficulty);
    let suggestion = session.lifecycle.suggest_time(category, estimated_time);
    if suggestion.suggested_time != estimated_time {
        println!(
            "Suggestion: plan {}m instead of {}m. {}",
            suggestion.suggested_time, estimated_time, suggestion.reason
        );
    }

    let mut quest = Quest::new(title, category, difficulty, estimated_time, now);
    quest.subtasks = subtasks
        .into_iter()
        .enumerate()
        .map(|(i, title)| Subtask::new(title, 0, i as u32))
        .collect();

    let id = session.lifecycle.add_quest(quest);
    session.save()?;
    println!("Quest added [{}].", short(id));
    Ok(())
}

pub fn complete_quest(session: &mut Session, prefix: &str, now: DateTime<Local>) -> Result<()> {
    let id = resolve_quest(&session.lifecycle, prefix)?;
    let events = session.lifecycle.complete(id, now);
    if events.is_empty() {
        bail!("quest [{}] is already completed", short(id));
    }
    session.save()?;
    print_events(&events);
    Ok(())
}

pub fn undo_quest(session: &mut Session, prefix: &str, now: DateTime<Local>) -> Result<()> {
    let id = resolve_quest(&session.lifecycle, prefix)?;
    let was_completed = session
        .lifecycle
        .quest(id)
        .map(|q| q.is_completed)
        .unwrap_or(false);

    session.lifecycle.reactivate(id, now);

    let quest = session.lifecycle.quest(id);
    match quest {
        Some(q) if !q.is_completed && was_completed => {
            session.save()?;
            println!("Quest [{}] is active again; its rewards were taken back.", short(id));
        }
        Some(q) if q.is_completed => {
            bail!("too late to undo [{}]: more than an hour has passed", short(id))
        }
        _ => bail!("quest [{}] isn't completed", short(id)),
    }
    Ok(())
}

pub fn start_tracking(session: &mut Session, prefix: &str, now: DateTime<Local>) -> Result<()> {
    let id = resolve_quest(&session.lifecycle, prefix)?;
    session.lifecycle.start_tracking(id, now);
    session.save()?;
    println!("Timer running on [{}].", short(id));
    Ok(())
}

pub fn stop_tracking(session: &mut Session, prefix: &str, now: DateTime<Local>) -> Result<()> {
    let id = resolve_quest(&session.lifecycle, prefix)?;
    session.lifecycle.stop_tracking(id, now);
    session.save()?;
    if let Some(quest) = session.lifecycle.quest(id) {
        println!("Timer stopped; {}m tracked on [{}].", quest.actual_time_spent, short(id));
    }
    Ok(())
}

pub fn toggle_subtask(
    session: &mut Session,
    prefix: &str,
    step: usize,
    now: DateTime<Local>,
) -> Result<()> {
    let id = resolve_quest(&session.lifecycle, prefix)?;
    let Some(quest) = session.lifecycle.quest(id) else {
        bail!("no quest matches '{prefix}'");
    };
    if step == 0 || step > quest.subtasks.len() {
        bail!("quest [{}] has {} subtask(s)", short(id), quest.subtasks.len());
    }
    let subtask_id = quest.subtasks[step - 1].id;

    let events = session.lifecycle.toggle_subtask(id, subtask_id, now);
    session.save()?;
    print_events(&events);
    Ok(())
}

pub fn list_quests(session: &Session, all: bool) -> Result<()> {
    let quests = if all {
        session.lifecycle.quests()
    } else {
        session.lifecycle.active_quests()
    };
    if quests.is_empty() {
        println!("No quests. Add one with `questforge new`.");
        return Ok(());
    }

    for quest in quests {
        let state = if quest.is_completed { "✔" } else { " " };
        let daily = if quest.is_daily { " (daily)" } else { "" };
        println!(
            "{} [{}] {} {} - {} ({}m){}",
            state,
            short(quest.id),
            quest.category.icon(),
            quest.title,
            quest.difficulty.label(),
            quest.estimated_time,
            daily
        );
        for (i, subtask) in quest.subtasks.iter().enumerate() {
            let mark = if subtask.is_completed { "x" } else { " " };
            println!("      {}. [{}] {}", i + 1, mark, subtask.title);
        }
    }
    Ok(())
}

// ========================================
// DAILIES, ESTIMATES, FOCUS
// ========================================

pub fn list_templates(time: Option<TimeOfDay>) -> Result<()> {
    let templates: Vec<&'static DailyQuestTemplate> = match time {
        Some(time) => {
            println!("{} templates (anytime included):", time.label());
            DailyQuestTemplate::for_time_of_day(time)
        }
        None => TEMPLATES.iter().collect(),
    };

    for template in templates {
        println!(
            "{:<24} {} {} ({}m, {} XP, {} gold)",
            template.id,
            template.category.icon(),
            template.normal_title,
            template.estimated_time,
            template.base_xp,
            template.base_gold
        );
    }
    Ok(())
}

pub fn suggest(session: &Session, category: TaskCategory, estimated_time: u32) -> Result<()> {
    let suggestion = session.lifecycle.suggest_time(category, estimated_time);
    println!(
        "{} tasks, {}m planned -> suggest {}m ({:?} confidence)",
        category.label(),
        estimated_time,
        suggestion.suggested_time,
        suggestion.confidence
    );
    println!("{}", suggestion.reason);
    Ok(())
}

pub fn focus(session: &mut Session, minutes: u32, now: DateTime<Local>) -> Result<()> {
    let events = session.lifecycle.add_focus_minutes(minutes, now);
    session.save()?;
    println!(
        "Logged {}m of focus ({} total).",
        minutes,
        session.lifecycle.character().total_focus_minutes
    );
    print_events(&events);
    Ok(())
}

pub fn list_achievements(session: &Session) -> Result<()> {
    let evaluator = session.lifecycle.evaluator();
    println!(
        "{} / {} unlocked",
        evaluator.unlocked_count(),
        AchievementDef::total_count()
    );
    for achievement in evaluator.achievements() {
        let Some(def) = achievement.def() else { continue };
        if achievement.is_unlocked {
            println!("  {} {} - {}", def.icon, def.title, def.description);
        } else {
            println!(
                "  🔒 {} ({} / {})",
                def.title, achievement.progress, def.required_value
            );
        }
    }
    Ok(())
}

// ========================================
// ROUTINES
// ========================================

pub fn add_routine(
    session: &mut Session,
    name: String,
    routine_type: RoutineType,
    steps: Vec<String>,
    now: DateTime<Local>,
) -> Result<()> {
    if steps.is_empty() {
        bail!("a routine needs at least one step");
    }

    let mut routine = Routine::new(name, routine_type, now);
    routine.steps = steps
        .into_iter()
        .enumerate()
        .map(|(i, title)| RoutineStep::new(title, routine_type.default_icon(), 5, i as u32))
        .collect();

    let id = session.lifecycle.add_routine(routine);
    session.save()?;
    println!("Routine added [{}].", short(id));
    Ok(())
}

pub fn check_routine_step(
    session: &mut Session,
    prefix: &str,
    step: usize,
    now: DateTime<Local>,
) -> Result<()> {
    let id = resolve_routine(&session.lifecycle, prefix)?;
    let Some(routine) = session.lifecycle.routine(id) else {
        bail!("no routine matches '{prefix}'");
    };
    if step == 0 || step > routine.steps.len() {
        bail!("routine has {} step(s)", routine.steps.len());
    }
    let step_id = routine.steps[step - 1].id;

    let events = session.lifecycle.toggle_routine_step(id, step_id, now);
    session.save()?;
    print_events(&events);
    Ok(())
}

pub fn list_routines(session: &Session, now: DateTime<Local>) -> Result<()> {
    let routines = session.lifecycle.routines();
    if routines.is_empty() {
        println!("No routines. Add one with `questforge routine add`.");
        return Ok(());
    }

    let today = now.date_naive();
    for routine in routines {
        let done = routine.completed_steps_on(today);
        println!(
            "[{}] {} {} (~{}m) - {}/{} steps today, {} day streak",
            short(routine.id),
            routine.icon,
            routine.name,
            routine.total_estimated_time(),
            done,
            routine.steps.len(),
            routine.completion_streak
        );
        for (i, step) in routine.steps.iter().enumerate() {
            let mark = if step.is_completed_on(today) { "x" } else { " " };
            println!("    {}. [{}] {}", i + 1, mark, step.title);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn daily_ids(session: &Session) -> Vec<QuestId> {
        let mut ids: Vec<QuestId> = session
            .lifecycle
            .quests()
            .iter()
            .filter(|q| q.is_daily)
            .map(|q| q.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn daily_quest_ids_are_stable_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            save_path: dir.path().join("save.json"),
            epic_titles: true,
        };
        let now = Local::now();

        let mut session = Session::load(&settings, now).unwrap();
        session.lifecycle.create_character(
            crate::engine::CharacterSpec {
                name: "Robin".to_string(),
                class: CharacterClass::Ranger,
                background: Background::Student,
                traits: vec![],
                motivation: Motivation::Balanced,
                daily_quest_ids: vec!["make_bed".to_string()],
            },
            now,
        );
        session.save().unwrap();

        // Next day, the first load rotates a fresh daily quest in and
        // persists it; the second load must resolve the same instance
        // instead of minting a new id.
        let tomorrow = now + Duration::days(1);
        let session = Session::load(&settings, tomorrow).unwrap();
        let first = daily_ids(&session);
        assert_eq!(first.len(), 2); // yesterday's instance is retained

        let session = Session::load(&settings, tomorrow).unwrap();
        assert_eq!(daily_ids(&session), first);
    }

    #[test]
    fn fresh_load_is_persisted_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            save_path: dir.path().join("save.json"),
            epic_titles: true,
        };

        Session::load(&settings, Local::now()).unwrap();
        assert!(settings.save_path.exists());
    }
}
