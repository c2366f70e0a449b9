use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::ProfileModel,
    repository::ProfileRepository,
    types::{ProfileResponse, UpsertProfileRequest},
};
use crate::shared::AppError;

pub const MAX_USERNAME_LEN: usize = 50;

/// Service for reading and editing user profiles
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository + Send + Sync>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileResponse, AppError> {
        self.repository
            .get_profile(user_id)
            .await?
            .map(ProfileResponse::from)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        request: UpsertProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::ValidationError(
                "Username must not be empty".to_string(),
            ));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::ValidationError(format!(
                "Username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }

        let leetcode_username = request
            .leetcode_username
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let profile = ProfileModel::new(user_id, username, leetcode_username);
        let stored = self.repository.upsert_profile(&profile).await?;

        info!(
            user_id = %stored.id,
            username = %stored.username,
            linked = stored.leetcode_username.is_some(),
            "Profile saved"
        );

        Ok(stored.into())
    }
}
