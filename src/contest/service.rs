use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{ContestModel, NewContest},
    repository::{ContestRepository, JoinContestResult, LeaveContestResult},
    types::{ContestResponse, CreateContestRequest},
};
use crate::{profile::repository::ProfileRepository, shared::AppError};

pub const MAX_TITLE_LEN: usize = 100;
pub const MIN_DURATION_DAYS: i32 = 1;
pub const MAX_DURATION_DAYS: i32 = 14;
pub const MIN_PARTICIPANTS: i32 = 2;
pub const MAX_PARTICIPANTS: i32 = 5;

/// Service for contest creation and membership
pub struct ContestService {
    repository: Arc<dyn ContestRepository + Send + Sync>,
    profiles: Arc<dyn ProfileRepository + Send + Sync>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checks creation input and normalizes optional text fields
pub fn validate_new_contest(request: CreateContestRequest) -> Result<NewContest, AppError> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::ValidationError(
            "Title must not be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::ValidationError(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&request.duration_days) {
        return Err(AppError::ValidationError(format!(
            "Duration must be between {MIN_DURATION_DAYS} and {MAX_DURATION_DAYS} days"
        )));
    }
    if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&request.max_participants) {
        return Err(AppError::ValidationError(format!(
            "Max participants must be between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS}"
        )));
    }

    Ok(NewContest {
        title,
        description: non_blank(request.description),
        duration_days: request.duration_days,
        max_participants: request.max_participants,
        forfeit: non_blank(request.forfeit),
    })
}

impl ContestService {
    pub fn new(
        repository: Arc<dyn ContestRepository + Send + Sync>,
        profiles: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            profiles,
        }
    }

    /// Creates an active contest owned by `user_id`, starting now
    #[instrument(skip(self))]
    pub async fn create_contest(
        &self,
        user_id: &str,
        request: CreateContestRequest,
    ) -> Result<ContestResponse, AppError> {
        let new_contest = validate_new_contest(request)?;
        let now = Utc::now();
        let contest = ContestModel::new(user_id, new_contest, now);
        debug!(contest_id = %contest.id, "Generated contest ID");

        self.repository.create_contest(&contest).await?;

        info!(
            contest_id = %contest.id,
            title = %contest.title,
            duration_days = contest.duration_days,
            "Contest created successfully"
        );

        Ok(ContestResponse::from_model(contest, 0, now))
    }

    #[instrument(skip(self))]
    pub async fn get_contest_details(&self, contest_id: &str) -> Result<ContestResponse, AppError> {
        let contest = self
            .repository
            .get_contest(contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("contest could not be found".to_string()))?;
        let participant_count = self.repository.list_participants(contest_id).await?.len() as i64;

        Ok(ContestResponse::from_model(
            contest,
            participant_count,
            Utc::now(),
        ))
    }

    #[instrument(skip(self))]
    pub async fn list_contests(&self) -> Result<Vec<ContestResponse>, AppError> {
        let now = Utc::now();
        let listings = self.repository.list_contests().await?;
        info!(contest_count = listings.len(), "Contests retrieved successfully");

        Ok(listings
            .into_iter()
            .map(|listing| {
                ContestResponse::from_model(listing.contest, listing.participant_count, now)
            })
            .collect())
    }

    /// Joins the contest. The caller must have a profile so they can be shown on the leaderboard.
    #[instrument(skip(self))]
    pub async fn join_contest(
        &self,
        contest_id: &str,
        user_id: &str,
    ) -> Result<ContestResponse, AppError> {
        if self.profiles.get_profile(user_id).await?.is_none() {
            warn!(user_id = %user_id, "Join attempted without a profile");
            return Err(AppError::ValidationError(
                "Create a profile before joining a contest".to_string(),
            ));
        }

        match self
            .repository
            .try_join_contest(contest_id, user_id, Utc::now())
            .await?
        {
            JoinContestResult::Joined => self.get_contest_details(contest_id).await,
            JoinContestResult::ContestNotFound => Err(AppError::NotFound(
                "contest could not be found".to_string(),
            )),
            JoinContestResult::ContestFull => {
                Err(AppError::Conflict("Contest is full".to_string()))
            }
            JoinContestResult::ContestCompleted => Err(AppError::Conflict(
                "Contest has already ended".to_string(),
            )),
        }
    }

    #[instrument(skip(self))]
    pub async fn leave_contest(&self, contest_id: &str, user_id: &str) -> Result<(), AppError> {
        match self.repository.leave_contest(contest_id, user_id).await? {
            LeaveContestResult::Left => Ok(()),
            LeaveContestResult::NotParticipant => Err(AppError::Conflict(
                "User is not a participant of this contest".to_string(),
            )),
            LeaveContestResult::ContestNotFound => Err(AppError::NotFound(
                "contest could not be found".to_string(),
            )),
        }
    }
}
