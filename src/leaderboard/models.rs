use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contest::{models::Participant, types::ContestResponse};
use crate::stats::StatsSnapshot;

/// A participant, their snapshot for this pass if the fetch succeeded, and its score
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub participant: Participant,
    pub snapshot: Option<StatsSnapshot>,
    pub score: i64,
}

/// One leaderboard row. Rows arrive pre-sorted; `rank` is 1-based with no gaps and no ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub display_name: String,
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub score: i64,
}

/// One bar of the stacked difficulty chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeriesPoint {
    pub name: String,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
}

/// Complete result of one aggregation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestLeaderboard {
    pub contest: ContestResponse,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub chart_series: Vec<ChartSeriesPoint>,
    pub captured_at: DateTime<Utc>,
}
