use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for profiles table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProfileModel {
    pub id: String,                        // Same id as the backend's user
    pub username: String,                  // Display name shown on leaderboards
    pub leetcode_username: Option<String>, // External stats account, if linked
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileModel {
    pub fn new(id: &str, username: String, leetcode_username: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            username,
            leetcode_username,
            created_at: now,
            updated_at: now,
        }
    }
}
