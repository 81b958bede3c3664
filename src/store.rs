//! Game state persistence
//!
//! The whole session is persisted as one JSON snapshot. Saves take an
//! exclusive lock and go through a temp file + rename so a crash mid-write
//! never corrupts the save.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::{Achievement, Character, Quest, Routine};
use crate::engine::{AchievementEvaluator, QuestLifecycle, StreakTracker, TimeEstimateHistory};

/// One serializable snapshot of everything the engine owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub character: Character,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub routines: Vec<Routine>,
    #[serde(default)]
    pub estimates: TimeEstimateHistory,
    pub streak: StreakTracker,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl GameData {
    pub fn snapshot(lifecycle: &QuestLifecycle) -> Self {
        Self {
            character: lifecycle.character().clone(),
            quests: lifecycle.quests().into_iter().cloned().collect(),
            routines: lifecycle.routines().into_iter().cloned().collect(),
            estimates: lifecycle.estimates().clone(),
            streak: lifecycle.streak_tracker().clone(),
            achievements: lifecycle.evaluator().to_saved(),
        }
    }

    pub fn into_lifecycle(self) -> QuestLifecycle {
        QuestLifecycle::from_parts(
            self.character,
            self.quests,
            self.routines,
            self.estimates,
            self.streak,
            AchievementEvaluator::from_saved(self.achievements),
        )
    }
}

/// Where game snapshots are read from and written to
pub trait Store {
    fn load(&self) -> Result<Option<GameData>>;
    fn save(&self, data: &GameData) -> Result<()>;
}

/// JSON snapshot store on the local filesystem
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Default save location (~/.questforge/save.json)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".questforge")
            .join("save.json")
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Option<GameData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read save file: {}", self.path.display()))?;

        let data: GameData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse save file: {}", self.path.display()))?;

        Ok(Some(data))
    }

    /// Save with atomic write and file locking.
    ///
    /// 1. Exclusive lock prevents concurrent writers
    /// 2. Atomic write (temp file + rename) prevents corruption on crash
    /// 3. Parent directory is created if needed
    fn save(&self, data: &GameData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create save directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(data).with_context(|| "Failed to serialize game data")?;

        // Lock file is separate from the save to survive the rename
        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire save lock")?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write game data")?;

        temp_file
            .sync_all()
            .with_context(|| "Failed to sync save file")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename save file: {}", self.path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, TaskCategory};
    use chrono::Local;

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("nested").join("save.json"))
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let now = Local::now();

        let mut lifecycle = QuestLifecycle::new(now.date_naive());
        let id = lifecycle.add_quest(Quest::new(
            "Water plants",
            TaskCategory::LifeSkills,
            Difficulty::Easy,
            10,
            now,
        ));
        lifecycle.complete(id, now);

        store.save(&GameData::snapshot(&lifecycle)).unwrap();

        let restored = store.load().unwrap().unwrap().into_lifecycle();
        assert_eq!(restored.character().xp, lifecycle.character().xp);
        assert_eq!(restored.character().streak, 1);
        assert!(restored.quest(id).unwrap().is_completed);
        assert_eq!(
            restored.evaluator().unlocked_count(),
            lifecycle.evaluator().unlocked_count()
        );
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let now = Local::now();

        let mut lifecycle = QuestLifecycle::new(now.date_naive());
        store.save(&GameData::snapshot(&lifecycle)).unwrap();

        lifecycle.add_quest(Quest::new(
            "Read a chapter",
            TaskCategory::Academic,
            Difficulty::Easy,
            20,
            now,
        ));
        store.save(&GameData::snapshot(&lifecycle)).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored.quests.len(), 1);
    }
}
