use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::{Difficulty, TaskCategory};

/// The six character stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl StatType {
    pub const COUNT: usize = 6;

    /// All stats in fixed order (matches the `Stats` array layout)
    pub fn all() -> &'static [StatType] {
        &[
            Self::Strength,
            Self::Dexterity,
            Self::Constitution,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Strength => "💪",
            Self::Dexterity => "🤸",
            Self::Constitution => "❤️",
            Self::Intelligence => "🧠",
            Self::Wisdom => "🧘",
            Self::Charisma => "✨",
        }
    }

    fn idx(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Dexterity => 1,
            Self::Constitution => 2,
            Self::Intelligence => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fixed-size stat block indexed by [`StatType`]
///
/// Keeps stat lookups exhaustive instead of going through a string-keyed map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats([u32; StatType::COUNT]);

impl Default for Stats {
    fn default() -> Self {
        Self([10; StatType::COUNT])
    }
}

impl Stats {
    /// Increase a stat by `amount`
    pub fn raise(&mut self, stat: StatType, amount: u32) {
        self.0[stat.idx()] += amount;
    }

    /// Decrease a stat by `amount`, never dropping below 1
    pub fn lower(&mut self, stat: StatType, amount: u32) {
        self.0[stat.idx()] = self.0[stat.idx()].saturating_sub(amount).max(1);
    }

    /// D&D-style modifier: (stat - 10) / 2
    pub fn modifier(&self, stat: StatType) -> i32 {
        (self.0[stat.idx()] as i32 - 10) / 2
    }
}

impl Index<StatType> for Stats {
    type Output = u32;

    fn index(&self, stat: StatType) -> &u32 {
        &self.0[stat.idx()]
    }
}

impl IndexMut<StatType> for Stats {
    fn index_mut(&mut self, stat: StatType) -> &mut u32 {
        &mut self.0[stat.idx()]
    }
}

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Ranger,
    Warrior,
    WarriorKing,
    Pirate,
    IceMage,
    Necromancer,
    Dragon,
    Angel,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            Self::Ranger,
            Self::Warrior,
            Self::WarriorKing,
            Self::Pirate,
            Self::IceMage,
            Self::Necromancer,
            Self::Dragon,
            Self::Angel,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ranger => "Ranger",
            Self::Warrior => "Warrior",
            Self::WarriorKing => "Warrior King",
            Self::Pirate => "Pirate",
            Self::IceMage => "Ice Mage",
            Self::Necromancer => "Necromancer",
            Self::Dragon => "Dragon",
            Self::Angel => "Angel",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Ranger => "🏹",
            Self::Warrior => "⚔️",
            Self::WarriorKing => "👑",
            Self::Pirate => "🏴‍☠️",
            Self::IceMage => "❄️",
            Self::Necromancer => "💀",
            Self::Dragon => "🐉",
            Self::Angel => "😇",
        }
    }

    /// The stat this class is built around. Quests whose category shares
    /// this stat earn double XP.
    pub fn primary_stat(&self) -> StatType {
        match self {
            Self::Ranger => StatType::Dexterity,
            Self::Warrior | Self::WarriorKing => StatType::Strength,
            Self::Pirate => StatType::Charisma,
            Self::IceMage | Self::Necromancer => StatType::Intelligence,
            Self::Dragon => StatType::Constitution,
            Self::Angel => StatType::Wisdom,
        }
    }

    /// Starting stat bonuses applied at character creation
    pub fn stat_bonuses(&self) -> &'static [(StatType, u32)] {
        match self {
            Self::Ranger => &[(StatType::Dexterity, 3), (StatType::Wisdom, 2), (StatType::Strength, 1)],
            Self::Warrior => &[(StatType::Strength, 3), (StatType::Constitution, 2), (StatType::Dexterity, 1)],
            Self::WarriorKing => &[(StatType::Strength, 3), (StatType::Charisma, 2), (StatType::Constitution, 1)],
            Self::Pirate => &[(StatType::Charisma, 3), (StatType::Dexterity, 2), (StatType::Strength, 1)],
            Self::IceMage => &[(StatType::Intelligence, 3), (StatType::Wisdom, 2), (StatType::Constitution, 1)],
            Self::Necromancer => &[(StatType::Intelligence, 3), (StatType::Constitution, 2), (StatType::Wisdom, 1)],
            Self::Dragon => &[(StatType::Constitution, 3), (StatType::Strength, 2), (StatType::Wisdom, 1)],
            Self::Angel => &[(StatType::Wisdom, 3), (StatType::Charisma, 2), (StatType::Dexterity, 1)],
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for CharacterClass {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ranger" => Ok(Self::Ranger),
            "warrior" => Ok(Self::Warrior),
            "warrior_king" | "warrior-king" | "warriorking" => Ok(Self::WarriorKing),
            "pirate" => Ok(Self::Pirate),
            "ice_mage" | "ice-mage" | "icemage" => Ok(Self::IceMage),
            "necromancer" => Ok(Self::Necromancer),
            "dragon" => Ok(Self::Dragon),
            "angel" => Ok(Self::Angel),
            _ => Err(super::ParseEnumError::new("class", s)),
        }
    }
}

/// Character background, a small flavor bonus at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Student,
    Athlete,
    Artist,
    Leader,
    Explorer,
}

impl Background {
    pub fn all() -> &'static [Background] {
        &[Self::Student, Self::Athlete, Self::Artist, Self::Leader, Self::Explorer]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Athlete => "Athlete",
            Self::Artist => "Artist",
            Self::Leader => "Leader",
            Self::Explorer => "Explorer",
        }
    }

    pub fn stat_bonuses(&self) -> &'static [(StatType, u32)] {
        match self {
            Self::Student => &[(StatType::Intelligence, 1), (StatType::Wisdom, 1)],
            Self::Athlete => &[(StatType::Strength, 1), (StatType::Constitution, 1)],
            Self::Artist => &[(StatType::Dexterity, 1), (StatType::Charisma, 1)],
            Self::Leader => &[(StatType::Charisma, 1), (StatType::Wisdom, 1)],
            Self::Explorer => &[(StatType::Dexterity, 1), (StatType::Constitution, 1)],
        }
    }
}

impl std::str::FromStr for Background {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "athlete" => Ok(Self::Athlete),
            "artist" => Ok(Self::Artist),
            "leader" => Ok(Self::Leader),
            "explorer" => Ok(Self::Explorer),
            _ => Err(super::ParseEnumError::new("background", s)),
        }
    }
}

/// Personality traits picked at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterTrait {
    Disciplined,
    Creative,
    Social,
    Analytical,
    Resilient,
    Adventurous,
    Focused,
    Empathetic,
}

impl CharacterTrait {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disciplined => "Disciplined",
            Self::Creative => "Creative",
            Self::Social => "Social",
            Self::Analytical => "Analytical",
            Self::Resilient => "Resilient",
            Self::Adventurous => "Adventurous",
            Self::Focused => "Focused",
            Self::Empathetic => "Empathetic",
        }
    }
}

impl std::str::FromStr for CharacterTrait {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disciplined" => Ok(Self::Disciplined),
            "creative" => Ok(Self::Creative),
            "social" => Ok(Self::Social),
            "analytical" => Ok(Self::Analytical),
            "resilient" => Ok(Self::Resilient),
            "adventurous" => Ok(Self::Adventurous),
            "focused" => Ok(Self::Focused),
            "empathetic" => Ok(Self::Empathetic),
            _ => Err(super::ParseEnumError::new("trait", s)),
        }
    }
}

/// What drives the character (flavor, surfaced in UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    Achievement,
    Knowledge,
    Social,
    Health,
    Creative,
    Balanced,
}

impl Motivation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Achievement => "Achievement Hunter",
            Self::Knowledge => "Knowledge Seeker",
            Self::Social => "Social Butterfly",
            Self::Health => "Wellness Warrior",
            Self::Creative => "Creative Soul",
            Self::Balanced => "Balanced Life",
        }
    }
}

impl std::str::FromStr for Motivation {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "achievement" => Ok(Self::Achievement),
            "knowledge" => Ok(Self::Knowledge),
            "social" => Ok(Self::Social),
            "health" => Ok(Self::Health),
            "creative" => Ok(Self::Creative),
            "balanced" => Ok(Self::Balanced),
            _ => Err(super::ParseEnumError::new("motivation", s)),
        }
    }
}

/// The persistent player character
///
/// One instance per player, created once and mutated by every
/// reward-granting operation. Invariants are maintained by clamping:
/// `xp < xp_to_next` after level resolution, `health <= max_health`,
/// `level >= 1`, stats never drop below 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: Option<CharacterClass>,
    pub background: Option<Background>,
    #[serde(default)]
    pub traits: Vec<CharacterTrait>,
    pub motivation: Option<Motivation>,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub stats: Stats,
    pub health: u32,
    pub max_health: u32,
    pub gold: u32,
    /// Consecutive calendar days with at least one quest completion
    pub streak: u32,
    /// Template ids this character runs as daily quests
    #[serde(default)]
    pub daily_quest_ids: BTreeSet<String>,
    pub preferred_difficulty: Difficulty,

    // Cumulative counters feeding achievement checks
    #[serde(default)]
    pub total_quests_completed: u32,
    #[serde(default)]
    pub total_focus_minutes: u32,
    #[serde(default)]
    pub unique_classes_played: BTreeSet<CharacterClass>,
    #[serde(default)]
    pub quest_categories_completed: BTreeSet<TaskCategory>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: None,
            background: None,
            traits: Vec::new(),
            motivation: None,
            level: 1,
            xp: 0,
            xp_to_next: 100,
            stats: Stats::default(),
            health: 100,
            max_health: 100,
            gold: 100,
            streak: 0,
            daily_quest_ids: BTreeSet::new(),
            preferred_difficulty: Difficulty::Medium,
            total_quests_completed: 0,
            total_focus_minutes: 0,
            unique_classes_played: BTreeSet::new(),
            quest_categories_completed: BTreeSet::new(),
        }
    }
}

impl Character {
    /// Apply trait effects that change base numbers at creation time
    pub fn apply_trait_bonuses(&mut self) {
        for t in &self.traits {
            if let CharacterTrait::Resilient = t {
                self.max_health += 5 * self.level;
                self.health = self.max_health;
            }
        }
    }
}
