use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::DailyQuestTemplate;
use super::StatType;

/// Unique identifier for a quest
pub type QuestId = Uuid;

/// Unique identifier for a subtask
pub type SubtaskId = Uuid;

/// What kind of real-world work a quest represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Academic,
    Social,
    Fitness,
    Health,
    Creative,
    LifeSkills,
}

impl TaskCategory {
    pub const COUNT: usize = 6;

    pub fn all() -> &'static [TaskCategory] {
        &[
            Self::Academic,
            Self::Social,
            Self::Fitness,
            Self::Health,
            Self::Creative,
            Self::LifeSkills,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Social => "Social",
            Self::Fitness => "Fitness",
            Self::Health => "Health",
            Self::Creative => "Creative",
            Self::LifeSkills => "Life Skills",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Academic => "📚",
            Self::Social => "👥",
            Self::Fitness => "💪",
            Self::Health => "🏥",
            Self::Creative => "🎨",
            Self::LifeSkills => "🏠",
        }
    }

    /// Stat grown the most by this category; doubles quest XP when it
    /// matches the character class's primary stat.
    pub fn primary_stat(&self) -> StatType {
        match self {
            Self::Academic => StatType::Intelligence,
            Self::Social => StatType::Charisma,
            Self::Fitness => StatType::Strength,
            Self::Health => StatType::Constitution,
            Self::Creative => StatType::Dexterity,
            Self::LifeSkills => StatType::Wisdom,
        }
    }

    pub fn secondary_stat(&self) -> StatType {
        match self {
            Self::Academic => StatType::Wisdom,
            Self::Social => StatType::Wisdom,
            Self::Fitness => StatType::Constitution,
            Self::Health => StatType::Wisdom,
            Self::Creative => StatType::Charisma,
            Self::LifeSkills => StatType::Intelligence,
        }
    }

    pub(crate) fn idx(self) -> usize {
        match self {
            Self::Academic => 0,
            Self::Social => 1,
            Self::Fitness => 2,
            Self::Health => 3,
            Self::Creative => 4,
            Self::LifeSkills => 5,
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "academic" => Ok(Self::Academic),
            "social" => Ok(Self::Social),
            "fitness" => Ok(Self::Fitness),
            "health" => Ok(Self::Health),
            "creative" => Ok(Self::Creative),
            "life_skills" | "life-skills" | "lifeskills" => Ok(Self::LifeSkills),
            _ => Err(super::ParseEnumError::new("category", s)),
        }
    }
}

/// Quest difficulty; fixes the base XP reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Self::Easy, Self::Medium, Self::Hard]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Base XP for completing a quest of this difficulty
    pub fn base_xp(&self) -> u32 {
        match self {
            Self::Easy => 25,
            Self::Medium => 50,
            Self::Hard => 100,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(super::ParseEnumError::new("difficulty", s)),
        }
    }
}

/// One start/stop pair of tracked work time. Never mutated after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeSession {
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
}

impl TimeSession {
    /// Session length in whole minutes
    pub fn duration_minutes(&self) -> u32 {
        let secs = (self.end_time - self.start_time).num_seconds().max(0);
        (secs / 60) as u32
    }
}

/// A step within a quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Local>>,
    /// Estimated minutes for this step
    pub estimated_time: u32,
    pub order: u32,
}

impl Subtask {
    pub fn new(title: impl Into<String>, estimated_time: u32, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            completed_at: None,
            estimated_time,
            order,
        }
    }
}

/// A unit of trackable work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: TaskCategory,
    pub difficulty: Difficulty,
    /// Estimated minutes to complete
    pub estimated_time: u32,
    pub due_date: Option<DateTime<Local>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Local>>,
    pub is_daily: bool,
    /// Set when this quest was instantiated from the daily template catalog
    #[serde(default)]
    pub template_id: Option<String>,
    pub created_date: DateTime<Local>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Minutes accumulated from closed tracking sessions
    #[serde(default)]
    pub actual_time_spent: u32,
    /// Open timer, if tracking is running
    #[serde(default)]
    pub started_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub sessions: Vec<TimeSession>,
}

impl Quest {
    /// Create a new active quest
    pub fn new(
        title: impl Into<String>,
        category: TaskCategory,
        difficulty: Difficulty,
        estimated_time: u32,
        created_date: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            category,
            difficulty,
            estimated_time,
            due_date: None,
            is_completed: false,
            completed_at: None,
            is_daily: false,
            template_id: None,
            created_date,
            subtasks: Vec::new(),
            actual_time_spent: 0,
            started_at: None,
            sessions: Vec::new(),
        }
    }

    /// Instantiate a daily quest from a catalog template
    pub fn from_template(
        template: &DailyQuestTemplate,
        epic_title: bool,
        created_date: DateTime<Local>,
    ) -> Self {
        let (title, description) = if epic_title {
            (template.epic_title, template.normal_title)
        } else {
            (template.normal_title, template.epic_title)
        };
        let mut quest = Self::new(
            title,
            template.category,
            template.difficulty,
            template.estimated_time,
            created_date,
        );
        quest.description = description.to_string();
        quest.is_daily = true;
        quest.template_id = Some(template.id.to_string());
        quest
    }

    pub fn completed_subtask_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed).count()
    }

    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// XP for completing this quest.
    ///
    /// Template quests pay the template's fixed XP. Quests with subtasks
    /// pay the difficulty base scaled by the completed-subtask ratio,
    /// otherwise the plain difficulty base.
    pub fn xp_reward(&self) -> u32 {
        if let Some(template) = self.template() {
            return template.base_xp;
        }
        let base = self.difficulty.base_xp();
        if self.has_subtasks() {
            let ratio = self.completed_subtask_count() as f64 / self.subtasks.len() as f64;
            return (base as f64 * ratio) as u32;
        }
        base
    }

    /// Gold for completing this quest: template gold or half the XP
    pub fn gold_reward(&self) -> u32 {
        if let Some(template) = self.template() {
            return template.base_gold;
        }
        self.xp_reward() / 2
    }

    fn template(&self) -> Option<&'static DailyQuestTemplate> {
        self.template_id
            .as_deref()
            .and_then(DailyQuestTemplate::get)
    }
}
