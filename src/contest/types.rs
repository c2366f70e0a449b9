use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{ContestModel, ContestStatus};

/// Request payload for creating a new contest
#[derive(Debug, Deserialize)]
pub struct CreateContestRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_days: i32,
    pub max_participants: i32,
    #[serde(default)]
    pub forfeit: Option<String>,
}

/// Response for contest creation and contest information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub max_participants: i32,
    pub forfeit: Option<String>,
    pub status: ContestStatus,
    pub created_by: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub participant_count: i64,
}

impl ContestResponse {
    /// Builds the response with the status as of `now`
    pub fn from_model(contest: ContestModel, participant_count: i64, now: DateTime<Utc>) -> Self {
        Self {
            status: contest.effective_status(now),
            id: contest.id,
            title: contest.title,
            description: contest.description,
            duration_days: contest.duration_days,
            max_participants: contest.max_participants,
            forfeit: contest.forfeit,
            created_by: contest.created_by,
            start_date: contest.start_date,
            end_date: contest.end_date,
            participant_count,
        }
    }
}
