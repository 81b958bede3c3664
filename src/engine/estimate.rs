//! Adaptive time estimation
//!
//! Learns, per task category, the ratio of actual to estimated duration
//! from completed work and scales new estimates by it. Accumulation is
//! monotonic: reactivating a quest does not remove its contribution.

use serde::{Deserialize, Serialize};

use crate::domain::TaskCategory;

/// Running totals for one category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CategoryTimeData {
    pub total_estimated: u32,
    pub total_actual: u32,
    pub task_count: u32,
}

impl CategoryTimeData {
    /// Actual/estimated ratio; > 1.0 means tasks run over their estimate
    pub fn average_accuracy(&self) -> f64 {
        if self.task_count == 0 || self.total_estimated == 0 {
            return 0.0;
        }
        self.total_actual as f64 / self.total_estimated as f64
    }

    pub fn average_time_per_task(&self) -> u32 {
        if self.task_count == 0 {
            return 0;
        }
        self.total_actual / self.task_count
    }
}

/// How much historical data backs a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// An adjusted time estimate with an explanation
#[derive(Debug, Clone)]
pub struct TimeEstimateSuggestion {
    pub suggested_time: u32,
    pub confidence: Confidence,
    pub reason: String,
    pub historical_average: u32,
}

/// Per-category estimation history for one character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEstimateHistory {
    categories: [CategoryTimeData; TaskCategory::COUNT],
    pub overall_accuracy: f64,
    pub total_tasks_tracked: u32,
}

impl TimeEstimateHistory {
    pub fn category(&self, category: TaskCategory) -> &CategoryTimeData {
        &self.categories[category.idx()]
    }

    /// Fold one completed quest into the running totals. Never reversed.
    pub fn record_completion(&mut self, category: TaskCategory, estimated: u32, actual: u32) {
        let data = &mut self.categories[category.idx()];
        data.total_estimated += estimated;
        data.total_actual += actual;
        data.task_count += 1;
        self.total_tasks_tracked += 1;

        let total_estimated: u32 = self.categories.iter().map(|c| c.total_estimated).sum();
        let total_actual: u32 = self.categories.iter().map(|c| c.total_actual).sum();
        self.overall_accuracy = if total_estimated > 0 {
            total_actual as f64 / total_estimated as f64
        } else {
            0.0
        };
    }

    /// Suggest an adjusted duration for a new task.
    ///
    /// Fewer than 3 samples: low confidence, estimate unchanged. Otherwise
    /// the estimate is scaled by the category's accuracy ratio; 10 or more
    /// samples raises confidence to high and the reason calls out
    /// estimates that are off by more than 20% either way.
    pub fn suggest(&self, category: TaskCategory, original_estimate: u32) -> TimeEstimateSuggestion {
        let data = self.category(category);

        if data.task_count < 3 {
            return TimeEstimateSuggestion {
                suggested_time: original_estimate,
                confidence: Confidence::Low,
                reason: format!(
                    "Not enough data yet. Complete more {} tasks to improve estimates.",
                    category.label()
                ),
                historical_average: 0,
            };
        }

        let accuracy = data.average_accuracy();
        let suggested_time = (original_estimate as f64 * accuracy) as u32;

        let (confidence, reason) = if data.task_count >= 10 {
            let reason = if accuracy > 1.2 {
                format!(
                    "You typically take {}% longer than estimated for {} tasks.",
                    ((accuracy - 1.0) * 100.0) as u32,
                    category.label()
                )
            } else if accuracy < 0.8 {
                format!(
                    "You're usually {}% faster than estimated for {} tasks!",
                    ((1.0 - accuracy) * 100.0) as u32,
                    category.label()
                )
            } else {
                format!("Your estimates for {} tasks are pretty accurate!", category.label())
            };
            (Confidence::High, reason)
        } else {
            (
                Confidence::Medium,
                format!("Based on {} completed {} tasks.", data.task_count, category.label()),
            )
        };

        TimeEstimateSuggestion {
            suggested_time,
            confidence,
            reason,
            historical_average: data.average_time_per_task(),
        }
    }
}
