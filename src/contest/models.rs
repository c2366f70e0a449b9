use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContestStatus {
    Active,
    Completed,
}

/// Database model for contests table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestModel {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub max_participants: i32,
    pub forfeit: Option<String>, // What the losers owe, free text
    pub status: ContestStatus,
    pub created_by: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a contest, already validated
#[derive(Debug, Clone)]
pub struct NewContest {
    pub title: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub max_participants: i32,
    pub forfeit: Option<String>,
}

impl ContestModel {
    /// Creates an active contest starting at `now`
    pub fn new(created_by: &str, contest: NewContest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: contest.title,
            description: contest.description,
            duration_days: contest.duration_days,
            max_participants: contest.max_participants,
            forfeit: contest.forfeit,
            status: ContestStatus::Active,
            created_by: created_by.to_string(),
            start_date: now,
            end_date: now + Duration::days(i64::from(contest.duration_days)),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored status, or `Completed` once the end date has passed
    pub fn effective_status(&self, now: DateTime<Utc>) -> ContestStatus {
        if now >= self.end_date {
            ContestStatus::Completed
        } else {
            self.status
        }
    }

    pub fn is_full(&self, participant_count: usize) -> bool {
        participant_count >= self.max_participants.max(0) as usize
    }
}

/// A contest member joined with their profile
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub display_name: String,
    pub external_username: Option<String>,
}

impl Participant {
    /// The external username if it is set and not blank
    pub fn stats_username(&self) -> Option<&str> {
        self.external_username
            .as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
    }
}

/// Contest row with its current participant count, for listings
#[derive(Debug, Clone)]
pub struct ContestListing {
    pub contest: ContestModel,
    pub participant_count: i64,
}
