use super::{difficulty_weight, ScoreCalculator};
use crate::stats::StatsSnapshot;

/// `easy*1 + medium*3 + hard*5`, with negative counts clamped to zero
pub struct DifficultyWeightedCalculator;

impl Default for DifficultyWeightedCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyWeightedCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreCalculator for DifficultyWeightedCalculator {
    fn calculate(&self, snapshot: &StatsSnapshot) -> i64 {
        let weighted = |count: i64, weight: i64| count.max(0).saturating_mul(weight);

        weighted(snapshot.easy_solved, difficulty_weight::EASY)
            .saturating_add(weighted(snapshot.medium_solved, difficulty_weight::MEDIUM))
            .saturating_add(weighted(snapshot.hard_solved, difficulty_weight::HARD))
    }
}
