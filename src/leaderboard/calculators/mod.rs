mod difficulty_weighted;

pub use difficulty_weighted::DifficultyWeightedCalculator;

use crate::stats::StatsSnapshot;

/// Per-difficulty weights used by the default calculator
pub mod difficulty_weight {
    pub const EASY: i64 = 1;
    pub const MEDIUM: i64 = 3;
    pub const HARD: i64 = 5;
}

pub trait ScoreCalculator: Send + Sync {
    /// Pure score of one snapshot. Must never be negative.
    fn calculate(&self, snapshot: &StatsSnapshot) -> i64;
}
