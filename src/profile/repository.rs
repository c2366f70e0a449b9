use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::ProfileModel;
use crate::shared::AppError;

/// Trait for profile repository operations
#[async_trait]
pub trait ProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileModel>, AppError>;

    /// Inserts the profile or updates username and external account, keeping `created_at`
    async fn upsert_profile(&self, profile: &ProfileModel) -> Result<ProfileModel, AppError>;
}

/// In-memory implementation of ProfileRepository for development and testing
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, ProfileModel>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileModel>, AppError> {
        let profiles = self.profiles.read().await;
        let profile = profiles.get(user_id).cloned();

        match &profile {
            Some(p) => debug!(user_id = %user_id, username = %p.username, "Profile found in memory"),
            None => debug!(user_id = %user_id, "Profile not found in memory"),
        }

        Ok(profile)
    }

    #[instrument(skip(self, profile))]
    async fn upsert_profile(&self, profile: &ProfileModel) -> Result<ProfileModel, AppError> {
        debug!(user_id = %profile.id, username = %profile.username, "Upserting profile in memory");

        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .entry(profile.id.clone())
            .and_modify(|existing| {
                existing.username = profile.username.clone();
                existing.leetcode_username = profile.leetcode_username.clone();
                existing.updated_at = profile.updated_at;
            })
            .or_insert_with(|| profile.clone())
            .clone();

        Ok(stored)
    }
}

/// PostgreSQL implementation of profile repository
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileModel>, AppError> {
        debug!(user_id = %user_id, "Fetching profile from database");

        sqlx::query_as::<_, ProfileModel>(
            "SELECT id, username, leetcode_username, created_at, updated_at FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, "Failed to fetch profile from database");
            AppError::DatabaseError(e.to_string())
        })
    }

    #[instrument(skip(self, profile))]
    async fn upsert_profile(&self, profile: &ProfileModel) -> Result<ProfileModel, AppError> {
        debug!(user_id = %profile.id, username = %profile.username, "Upserting profile in database");

        sqlx::query_as::<_, ProfileModel>(
            "INSERT INTO profiles (id, username, leetcode_username, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username, \
             leetcode_username = EXCLUDED.leetcode_username, updated_at = EXCLUDED.updated_at \
             RETURNING id, username, leetcode_username, created_at, updated_at",
        )
        .bind(&profile.id)
        .bind(&profile.username)
        .bind(&profile.leetcode_username)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %profile.id, "Failed to upsert profile in database");
            AppError::DatabaseError(e.to_string())
        })
    }
}
