//! Daily quest template catalog
//!
//! Static configuration: the set of quests a character can pick as daily
//! quests. Loaded once, never mutated.

use serde::{Deserialize, Serialize};

use super::{Difficulty, TaskCategory};

/// Rough slot in the day a template is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl TimeOfDay {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Anytime => "Anytime",
        }
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "anytime" => Ok(Self::Anytime),
            _ => Err(super::ParseEnumError::new("time of day", s)),
        }
    }
}

/// A quest blueprint in the daily catalog
#[derive(Debug, Clone)]
pub struct DailyQuestTemplate {
    pub id: &'static str,
    /// Fantasy-flavored title
    pub epic_title: &'static str,
    /// Plain real-world title
    pub normal_title: &'static str,
    pub category: TaskCategory,
    pub difficulty: Difficulty,
    pub estimated_time: u32,
    pub base_xp: u32,
    pub base_gold: u32,
    pub icon: &'static str,
    pub time_of_day: TimeOfDay,
}

const fn tpl(
    id: &'static str,
    epic_title: &'static str,
    normal_title: &'static str,
    category: TaskCategory,
    difficulty: Difficulty,
    estimated_time: u32,
    base_xp: u32,
    base_gold: u32,
    icon: &'static str,
    time_of_day: TimeOfDay,
) -> DailyQuestTemplate {
    DailyQuestTemplate {
        id,
        epic_title,
        normal_title,
        category,
        difficulty,
        estimated_time,
        base_xp,
        base_gold,
        icon,
        time_of_day,
    }
}

use Difficulty::{Easy, Hard, Medium};
use TaskCategory::{Academic, Creative, Fitness, Health, LifeSkills, Social};
use TimeOfDay::{Afternoon, Anytime, Evening, Morning};

/// All daily quest templates
pub static TEMPLATES: &[DailyQuestTemplate] = &[
    // Morning hygiene
    tpl("morning_shower", "The Cleansing Ritual of Dawn", "Morning Shower", Health, Easy, 15, 30, 5, "🚿", Morning),
    tpl("brush_teeth_morning", "Defend the Ivory Gates", "Brush Teeth (Morning)", Health, Easy, 3, 20, 3, "🦷", Morning),
    tpl("floss_teeth", "Thread the Needle of Dental Excellence", "Floss Teeth", Health, Medium, 5, 25, 4, "🦷✨", Evening),
    tpl("hair_care", "Tame the Wild Mane", "Brush/Style Hair", Health, Easy, 5, 15, 2, "💇", Morning),
    // School preparation
    tpl("pack_lunch", "Prepare the Adventurer's Feast", "Pack Lunch", LifeSkills, Easy, 10, 25, 4, "🍱", Morning),
    tpl("pack_homework", "Secure the Sacred Scrolls", "Pack Homework", Academic, Easy, 5, 20, 3, "📝", Morning),
    tpl("pack_backpack", "Ready the Explorer's Arsenal", "Pack Backpack", LifeSkills, Easy, 10, 25, 4, "🎒", Morning),
    // Academic
    tpl("complete_homework", "Conquer the Academic Challenges", "Complete Homework", Academic, Medium, 45, 60, 10, "📚", Afternoon),
    tpl("study_session", "Delve into the Tomes of Knowledge", "Study Session", Academic, Medium, 30, 50, 8, "🧠", Afternoon),
    tpl("read_20min", "Journey Through Literary Realms", "Read for 20 Minutes", Academic, Easy, 20, 35, 5, "📖", Anytime),
    // Physical activity
    tpl("morning_exercise", "Train at the Dawn Dojo", "Morning Exercise", Fitness, Medium, 20, 45, 7, "🏃", Morning),
    tpl("stretch_routine", "Master the Art of Flexibility", "Stretching Routine", Fitness, Easy, 10, 25, 4, "🧘", Anytime),
    tpl("outdoor_activity", "Venture into the Wild", "30 Min Outdoor Activity", Fitness, Medium, 30, 50, 8, "🌳", Afternoon),
    // Life skills & chores
    tpl("tidy_room", "Restore Order to Your Sanctuary", "Tidy Room", LifeSkills, Easy, 15, 30, 5, "🧹", Anytime),
    tpl("make_bed", "Craft the Perfect Resting Chamber", "Make Bed", LifeSkills, Easy, 5, 15, 2, "🛏️", Morning),
    tpl("organize_desk", "Master Your Command Center", "Organize Desk/Workspace", LifeSkills, Easy, 10, 25, 4, "🗂️", Anytime),
    // Evening routines
    tpl("prepare_tomorrow", "Plan Tomorrow's Campaign", "Prepare for Tomorrow", LifeSkills, Easy, 10, 25, 4, "📅", Evening),
    tpl("evening_reflection", "Meditate on Today's Adventures", "Evening Reflection/Journal", Health, Easy, 10, 30, 5, "📔", Evening),
    tpl("brush_teeth_night", "The Nighttime Dental Defense", "Brush Teeth (Night)", Health, Easy, 3, 20, 3, "🦷🌙", Evening),
    // Social & creative
    tpl("help_family", "Aid Your Fellow Adventurers", "Help Family Member", Social, Easy, 15, 35, 6, "🤝", Anytime),
    tpl("creative_time", "Channel Your Creative Energy", "Creative Activity (Draw/Music/Write)", Creative, Medium, 30, 45, 7, "🎨", Anytime),
    tpl("practice_skill", "Hone Your Chosen Craft", "Practice Instrument/Skill", Creative, Medium, 20, 40, 6, "🎵", Anytime),
    // Test & study
    tpl("study_for_test", "Forge Knowledge in the Crucible of Study", "Study for Test/Quiz", Academic, Hard, 45, 60, 10, "📚", Anytime),
    tpl("complete_quiz", "Face the Trial of Knowledge", "Complete Quiz/Test", Academic, Hard, 30, 50, 8, "📋", Anytime),
    tpl("review_notes", "Decipher the Ancient Scrolls", "Review Class Notes", Academic, Medium, 20, 30, 5, "📓", Anytime),
    // New activities & challenges
    tpl("try_new_activity", "Venture Into the Unknown", "Try a New Activity", Social, Medium, 30, 40, 6, "🌟", Anytime),
    tpl("join_club_meeting", "Gather with the Alliance", "Attend Club/Group Meeting", Social, Medium, 60, 45, 7, "👥", Afternoon),
    tpl("talk_to_new_person", "Forge New Alliances", "Talk to Someone New", Social, Hard, 10, 35, 5, "🗣️", Anytime),
    // Focus & organization
    tpl("organize_workspace", "Restore Order to the Chaos Realm", "Organize Desk/Workspace", LifeSkills, Medium, 15, 25, 4, "🗂️", Anytime),
    tpl("use_planner", "Chart the Path of Destiny", "Update Planner/Calendar", LifeSkills, Easy, 10, 20, 3, "📅", Anytime),
    tpl("break_task_chunks", "Divide and Conquer the Mountain", "Break Big Task into Steps", LifeSkills, Medium, 15, 30, 5, "📊", Anytime),
    // Emotional regulation
    tpl("mindfulness_break", "Commune with the Inner Spirit", "5-Minute Mindfulness", Health, Easy, 5, 15, 2, "🧘", Anytime),
    tpl("journal_feelings", "Chronicle the Emotional Journey", "Journal Thoughts/Feelings", Health, Medium, 15, 25, 4, "📔", Evening),
    tpl("ask_for_help", "Summon the Wisdom of Allies", "Ask for Help When Needed", Social, Hard, 10, 40, 6, "🤝", Anytime),
    // Movement & energy
    tpl("movement_break", "Dance with the Energy Dragons", "5-Minute Movement Break", Fitness, Easy, 5, 15, 2, "💃", Anytime),
    tpl("fidget_tool", "Channel the Restless Energy", "Use Fidget Tool During Task", Health, Easy, 30, 20, 3, "🎯", Anytime),
];

impl DailyQuestTemplate {
    /// Look up a template by id
    pub fn get(id: &str) -> Option<&'static DailyQuestTemplate> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    /// Templates suitable for a given time of day (anytime always included)
    pub fn for_time_of_day(time: TimeOfDay) -> Vec<&'static DailyQuestTemplate> {
        TEMPLATES
            .iter()
            .filter(|t| t.time_of_day == time || t.time_of_day == TimeOfDay::Anytime)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ids_are_unique() {
        let mut ids: Vec<_> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn lookup_by_id() {
        let t = DailyQuestTemplate::get("study_session").unwrap();
        assert_eq!(t.base_xp, 50);
        assert_eq!(t.category, TaskCategory::Academic);
        assert!(DailyQuestTemplate::get("no_such_template").is_none());
    }

    #[test]
    fn morning_filter_includes_anytime() {
        let morning = DailyQuestTemplate::for_time_of_day(TimeOfDay::Morning);
        assert!(morning.iter().any(|t| t.id == "make_bed"));
        assert!(morning.iter().any(|t| t.id == "read_20min"));
        assert!(!morning.iter().any(|t| t.id == "floss_teeth"));
    }
}
