use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StatsResult, StatsSnapshot};

/// Copies a provider result into a fresh snapshot owned by `owner_id`
pub fn build_snapshot(
    owner_id: &str,
    stats: &StatsResult,
    captured_at: DateTime<Utc>,
) -> StatsSnapshot {
    StatsSnapshot {
        id: Uuid::new_v4().to_string(),
        owner_id: owner_id.to_string(),
        total_solved: stats.total_solved,
        easy_solved: stats.easy_solved,
        medium_solved: stats.medium_solved,
        hard_solved: stats.hard_solved,
        acceptance_rate: stats.acceptance_rate,
        ranking: stats.ranking,
        captured_at,
    }
}
