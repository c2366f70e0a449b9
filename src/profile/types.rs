use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::ProfileModel;

/// Request payload for creating or updating the caller's profile
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub username: String,
    #[serde(default)]
    pub leetcode_username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub leetcode_username: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileModel> for ProfileResponse {
    fn from(profile: ProfileModel) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            leetcode_username: profile.leetcode_username,
            updated_at: profile.updated_at,
        }
    }
}
