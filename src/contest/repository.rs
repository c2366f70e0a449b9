use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::{ContestListing, ContestModel, ContestStatus, Participant};
use crate::profile::repository::ProfileRepository;
use crate::shared::AppError;

/// Result of attempting to join a contest
#[derive(Debug, Clone, PartialEq)]
pub enum JoinContestResult {
    /// Joined, or was already a participant
    Joined,
    /// Contest is at `max_participants`
    ContestFull,
    /// Contest end date has passed
    ContestCompleted,
    /// Contest does not exist
    ContestNotFound,
}

/// Result of attempting to leave a contest
#[derive(Debug, Clone, PartialEq)]
pub enum LeaveContestResult {
    Left,
    NotParticipant,
    ContestNotFound,
}

/// Trait for contest repository operations
#[async_trait]
pub trait ContestRepository {
    async fn create_contest(&self, contest: &ContestModel) -> Result<(), AppError>;
    async fn get_contest(&self, contest_id: &str) -> Result<Option<ContestModel>, AppError>;

    /// All contests with their participant counts, newest first
    async fn list_contests(&self) -> Result<Vec<ContestListing>, AppError>;

    /// Members that have a profile, in join order
    async fn list_participants(&self, contest_id: &str) -> Result<Vec<Participant>, AppError>;

    /// Atomically checks status and capacity, then records the membership.
    /// Joining twice is not an error.
    async fn try_join_contest(
        &self,
        contest_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<JoinContestResult, AppError>;

    async fn leave_contest(
        &self,
        contest_id: &str,
        user_id: &str,
    ) -> Result<LeaveContestResult, AppError>;
}

#[derive(Debug, Clone)]
struct Membership {
    user_id: String,
    joined_at: DateTime<Utc>,
}

#[derive(Default)]
struct ContestTables {
    contests: HashMap<String, ContestModel>,
    memberships: HashMap<String, Vec<Membership>>,
}

/// In-memory implementation of ContestRepository for development and testing.
/// Participants are joined against the profile repository at read time.
pub struct InMemoryContestRepository {
    tables: RwLock<ContestTables>,
    profiles: Arc<dyn ProfileRepository + Send + Sync>,
}

impl InMemoryContestRepository {
    pub fn new(profiles: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        Self {
            tables: RwLock::new(ContestTables::default()),
            profiles,
        }
    }

    /// Member ids ordered by join time; equal times keep insertion order
    fn member_ids(tables: &ContestTables, contest_id: &str) -> Vec<String> {
        let mut members: Vec<&Membership> = tables
            .memberships
            .get(contest_id)
            .map(|members| members.iter().collect())
            .unwrap_or_default();
        members.sort_by_key(|m| m.joined_at);
        members.into_iter().map(|m| m.user_id.clone()).collect()
    }
}

#[async_trait]
impl ContestRepository for InMemoryContestRepository {
    #[instrument(skip(self, contest))]
    async fn create_contest(&self, contest: &ContestModel) -> Result<(), AppError> {
        debug!(contest_id = %contest.id, title = %contest.title, "Creating contest in memory");

        let mut tables = self.tables.write().await;
        if tables.contests.contains_key(&contest.id) {
            warn!(contest_id = %contest.id, "Contest already exists in memory");
            return Err(AppError::DatabaseError("Contest already exists".to_string()));
        }
        tables.contests.insert(contest.id.clone(), contest.clone());
        tables.memberships.insert(contest.id.clone(), Vec::new());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_contest(&self, contest_id: &str) -> Result<Option<ContestModel>, AppError> {
        let tables = self.tables.read().await;
        let contest = tables.contests.get(contest_id).cloned();

        match &contest {
            Some(c) => debug!(contest_id = %contest_id, title = %c.title, "Contest found in memory"),
            None => debug!(contest_id = %contest_id, "Contest not found in memory"),
        }

        Ok(contest)
    }

    #[instrument(skip(self))]
    async fn list_contests(&self) -> Result<Vec<ContestListing>, AppError> {
        // Copy out so the lock is not held across profile lookups
        let contests: Vec<(ContestModel, Vec<String>)> = {
            let tables = self.tables.read().await;
            tables
                .contests
                .values()
                .map(|contest| (contest.clone(), Self::member_ids(&tables, &contest.id)))
                .collect()
        };

        let mut listings = Vec::with_capacity(contests.len());
        for (contest, member_ids) in contests {
            // Same profile join as list_participants
            let mut participant_count = 0;
            for user_id in &member_ids {
                if self.profiles.get_profile(user_id).await?.is_some() {
                    participant_count += 1;
                }
            }
            listings.push(ContestListing {
                contest,
                participant_count,
            });
        }

        listings.sort_by(|a, b| {
            b.contest
                .created_at
                .cmp(&a.contest.created_at)
                .then_with(|| a.contest.id.cmp(&b.contest.id))
        });

        debug!(contest_count = listings.len(), "Contests listed from memory");
        Ok(listings)
    }

    #[instrument(skip(self))]
    async fn list_participants(&self, contest_id: &str) -> Result<Vec<Participant>, AppError> {
        // Copy member ids out so the lock is not held across profile lookups
        let member_ids = Self::member_ids(&*self.tables.read().await, contest_id);

        let mut participants = Vec::with_capacity(member_ids.len());
        for user_id in member_ids {
            match self.profiles.get_profile(&user_id).await? {
                Some(profile) => participants.push(Participant {
                    user_id: profile.id,
                    display_name: profile.username,
                    external_username: profile.leetcode_username,
                }),
                None => warn!(contest_id = %contest_id, user_id = %user_id, "Member has no profile, skipping"),
            }
        }

        Ok(participants)
    }

    #[instrument(skip(self))]
    async fn try_join_contest(
        &self,
        contest_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<JoinContestResult, AppError> {
        let mut tables = self.tables.write().await;
        let ContestTables {
            contests,
            memberships,
        } = &mut *tables;

        let Some(contest) = contests.get(contest_id) else {
            debug!(contest_id = %contest_id, "Contest not found");
            return Ok(JoinContestResult::ContestNotFound);
        };

        let members = memberships.entry(contest_id.to_string()).or_default();
        if members.iter().any(|m| m.user_id == user_id) {
            debug!(contest_id = %contest_id, user_id = %user_id, "User already in contest");
            return Ok(JoinContestResult::Joined);
        }

        if contest.effective_status(now) == ContestStatus::Completed {
            return Ok(JoinContestResult::ContestCompleted);
        }

        if contest.is_full(members.len()) {
            debug!(contest_id = %contest_id, current_count = members.len(), "Contest is full");
            return Ok(JoinContestResult::ContestFull);
        }

        members.push(Membership {
            user_id: user_id.to_string(),
            joined_at: now,
        });

        info!(
            contest_id = %contest_id,
            user_id = %user_id,
            participant_count = members.len(),
            "User joined contest"
        );
        Ok(JoinContestResult::Joined)
    }

    #[instrument(skip(self))]
    async fn leave_contest(
        &self,
        contest_id: &str,
        user_id: &str,
    ) -> Result<LeaveContestResult, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.contests.contains_key(contest_id) {
            return Ok(LeaveContestResult::ContestNotFound);
        }

        let members = tables.memberships.entry(contest_id.to_string()).or_default();
        let before = members.len();
        members.retain(|m| m.user_id != user_id);

        if members.len() == before {
            return Ok(LeaveContestResult::NotParticipant);
        }

        info!(contest_id = %contest_id, user_id = %user_id, "User left contest");
        Ok(LeaveContestResult::Left)
    }
}

/// PostgreSQL implementation of contest repository
pub struct PostgresContestRepository {
    pool: PgPool,
}

impl PostgresContestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CONTEST_COLUMNS: &str = "c.id, c.title, c.description, c.duration_days, c.max_participants, \
     c.forfeit, c.status, c.created_by, c.start_date, c.end_date, c.created_at, c.updated_at";

fn contest_from_row(row: &PgRow) -> Result<ContestModel, AppError> {
    let status: String = row.get("status");
    let status = ContestStatus::from_str(&status)
        .map_err(|_| AppError::DatabaseError(format!("Unknown contest status: {status}")))?;

    Ok(ContestModel {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        duration_days: row.get("duration_days"),
        max_participants: row.get("max_participants"),
        forfeit: row.get("forfeit"),
        status,
        created_by: row.get("created_by"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn database_error(context: &str) -> impl Fn(sqlx::Error) -> AppError + '_ {
    move |e| {
        warn!(error = %e, "{}", context);
        AppError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ContestRepository for PostgresContestRepository {
    #[instrument(skip(self, contest))]
    async fn create_contest(&self, contest: &ContestModel) -> Result<(), AppError> {
        debug!(contest_id = %contest.id, title = %contest.title, "Creating contest in database");

        sqlx::query(
            "INSERT INTO contests (id, title, description, duration_days, max_participants, forfeit, \
             status, created_by, start_date, end_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(&contest.id)
        .bind(&contest.title)
        .bind(&contest.description)
        .bind(contest.duration_days)
        .bind(contest.max_participants)
        .bind(&contest.forfeit)
        .bind(contest.status.to_string())
        .bind(&contest.created_by)
        .bind(contest.start_date)
        .bind(contest.end_date)
        .bind(contest.created_at)
        .bind(contest.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error("Failed to create contest in database"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_contest(&self, contest_id: &str) -> Result<Option<ContestModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests c WHERE c.id = $1"
        ))
        .bind(contest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch contest from database"))?;

        row.as_ref().map(contest_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_contests(&self) -> Result<Vec<ContestListing>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTEST_COLUMNS}, COUNT(p.id) AS participant_count \
             FROM contests c LEFT JOIN contest_participants cp ON cp.contest_id = c.id \
             LEFT JOIN profiles p ON p.id = cp.user_id \
             GROUP BY c.id ORDER BY c.created_at DESC, c.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list contests from database"))?;

        rows.iter()
            .map(|row| {
                Ok(ContestListing {
                    contest: contest_from_row(row)?,
                    participant_count: row.get("participant_count"),
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn list_participants(&self, contest_id: &str) -> Result<Vec<Participant>, AppError> {
        sqlx::query_as::<_, Participant>(
            "SELECT p.id AS user_id, p.username AS display_name, p.leetcode_username AS external_username \
             FROM contest_participants cp INNER JOIN profiles p ON p.id = cp.user_id \
             WHERE cp.contest_id = $1 ORDER BY cp.joined_at, cp.user_id",
        )
        .bind(contest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list contest participants"))
    }

    #[instrument(skip(self))]
    async fn try_join_contest(
        &self,
        contest_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<JoinContestResult, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to open transaction"))?;

        // Row lock serializes concurrent joins for the same contest
        let row = sqlx::query(&format!(
            "SELECT {CONTEST_COLUMNS} FROM contests c WHERE c.id = $1 FOR UPDATE"
        ))
        .bind(contest_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error("Failed to lock contest row"))?;

        let Some(row) = row else {
            return Ok(JoinContestResult::ContestNotFound);
        };
        let contest = contest_from_row(&row)?;

        let already_joined: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM contest_participants WHERE contest_id = $1 AND user_id = $2)",
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to check membership"))?;
        if already_joined {
            return Ok(JoinContestResult::Joined);
        }

        if contest.effective_status(now) == ContestStatus::Completed {
            return Ok(JoinContestResult::ContestCompleted);
        }

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contest_participants WHERE contest_id = $1")
                .bind(contest_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error("Failed to count participants"))?;
        if contest.is_full(count.max(0) as usize) {
            return Ok(JoinContestResult::ContestFull);
        }

        sqlx::query(
            "INSERT INTO contest_participants (id, contest_id, user_id, joined_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(contest_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(database_error("Failed to insert membership"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit join"))?;

        info!(contest_id = %contest_id, user_id = %user_id, "User joined contest");
        Ok(JoinContestResult::Joined)
    }

    #[instrument(skip(self))]
    async fn leave_contest(
        &self,
        contest_id: &str,
        user_id: &str,
    ) -> Result<LeaveContestResult, AppError> {
        if self.get_contest(contest_id).await?.is_none() {
            return Ok(LeaveContestResult::ContestNotFound);
        }

        let result =
            sqlx::query("DELETE FROM contest_participants WHERE contest_id = $1 AND user_id = $2")
                .bind(contest_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(database_error("Failed to delete membership"))?;

        if result.rows_affected() == 0 {
            return Ok(LeaveContestResult::NotParticipant);
        }

        info!(contest_id = %contest_id, user_id = %user_id, "User left contest");
        Ok(LeaveContestResult::Left)
    }
}
