//! Routines: named, ordered checklists run on a daily cadence
//!
//! Structurally parallel to quests but evaluated independently, with a
//! per-routine day-granularity completion streak.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a routine
pub type RoutineId = Uuid;

/// Unique identifier for a routine step
pub type RoutineStepId = Uuid;

/// What part of the day a routine belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineType {
    Morning,
    Evening,
    Study,
    Exercise,
    Custom,
}

impl RoutineType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Study => "Study",
            Self::Exercise => "Exercise",
            Self::Custom => "Custom",
        }
    }

    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Morning => "☀️",
            Self::Evening => "🌙",
            Self::Study => "📚",
            Self::Exercise => "💪",
            Self::Custom => "⭐",
        }
    }
}

impl std::str::FromStr for RoutineType {
    type Err = super::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "evening" => Ok(Self::Evening),
            "study" => Ok(Self::Study),
            "exercise" => Ok(Self::Exercise),
            "custom" => Ok(Self::Custom),
            _ => Err(super::ParseEnumError::new("routine type", s)),
        }
    }
}

/// One step in a routine checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: RoutineStepId,
    pub title: String,
    pub icon: String,
    /// Estimated minutes
    pub estimated_time: u32,
    pub order: u32,
    /// Optional steps don't block routine completion
    #[serde(default)]
    pub is_optional: bool,
    pub last_completed_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub completion_count: u32,
}

impl RoutineStep {
    pub fn new(title: impl Into<String>, icon: impl Into<String>, estimated_time: u32, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            icon: icon.into(),
            estimated_time,
            order,
            is_optional: false,
            last_completed_at: None,
            completion_count: 0,
        }
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.last_completed_at
            .map(|at| at.date_naive() == day)
            .unwrap_or(false)
    }

    pub fn mark_completed(&mut self, now: DateTime<Local>) {
        self.last_completed_at = Some(now);
        self.completion_count += 1;
    }

    /// Undo today's completion only; past completions stay counted
    pub fn mark_incomplete(&mut self, today: NaiveDate) {
        if self.is_completed_on(today) {
            self.last_completed_at = None;
            self.completion_count = self.completion_count.saturating_sub(1);
        }
    }
}

/// A named, ordered checklist with its own completion streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub id: RoutineId,
    pub name: String,
    pub icon: String,
    pub routine_type: RoutineType,
    #[serde(default)]
    pub steps: Vec<RoutineStep>,
    pub is_active: bool,
    /// Consecutive days this routine was fully completed
    #[serde(default)]
    pub completion_streak: u32,
    pub last_completed_date: Option<DateTime<Local>>,
    pub created_date: DateTime<Local>,
}

impl Routine {
    pub fn new(name: impl Into<String>, routine_type: RoutineType, created_date: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: routine_type.default_icon().to_string(),
            routine_type,
            steps: Vec::new(),
            is_active: true,
            completion_streak: 0,
            last_completed_date: None,
            created_date,
        }
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.last_completed_date
            .map(|at| at.date_naive() == day)
            .unwrap_or(false)
    }

    /// True once every non-optional step is done for `day`
    pub fn all_required_steps_done(&self, day: NaiveDate) -> bool {
        !self.steps.is_empty()
            && self
                .steps
                .iter()
                .all(|s| s.is_optional || s.is_completed_on(day))
    }

    pub fn completed_steps_on(&self, day: NaiveDate) -> usize {
        self.steps.iter().filter(|s| s.is_completed_on(day)).count()
    }

    pub fn total_estimated_time(&self) -> u32 {
        self.steps.iter().map(|s| s.estimated_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_steps_do_not_block_completion() {
        let now = Local::now();
        let mut routine = Routine::new("Morning", RoutineType::Morning, now);
        routine.steps.push(RoutineStep::new("Brush teeth", "🪥", 3, 0));
        let mut optional = RoutineStep::new("Read news", "📰", 10, 1);
        optional.is_optional = true;
        routine.steps.push(optional);

        let today = now.date_naive();
        assert!(!routine.all_required_steps_done(today));
        routine.steps[0].mark_completed(now);
        assert!(routine.all_required_steps_done(today));
    }

    #[test]
    fn mark_incomplete_only_undoes_today() {
        let now = Local::now();
        let today = now.date_naive();
        let mut step = RoutineStep::new("Stretch", "🧘", 5, 0);

        step.mark_completed(now - chrono::Duration::days(1));
        step.mark_incomplete(today);
        assert_eq!(step.completion_count, 1); // yesterday's completion stays

        step.mark_completed(now);
        assert!(step.is_completed_on(today));
        step.mark_incomplete(today);
        assert!(!step.is_completed_on(today));
        assert_eq!(step.completion_count, 1);
    }
}
