//! The progression and quest-lifecycle engine
//!
//! [`QuestLifecycle`] is the facade; the submodules each own one concern
//! and never reach across: progression mutates the character's numbers,
//! the streak tracker owns day reconciliation, the evaluator owns
//! achievement state, estimation owns its history.

mod estimate;
mod evaluator;
mod events;
mod lifecycle;
mod progression;
mod streak;

pub use estimate::{CategoryTimeData, Confidence, TimeEstimateHistory, TimeEstimateSuggestion};
pub use evaluator::AchievementEvaluator;
pub use events::{GameEvent, LevelUp};
pub use lifecycle::{CharacterSpec, QuestLifecycle};
pub use progression::{ProgressionEngine, RewardResult};
pub use streak::StreakTracker;
