use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info, instrument, warn};

use super::{
    calculators::{DifficultyWeightedCalculator, ScoreCalculator},
    chart, ranker, AggregationError, ContestLeaderboard,
};
use crate::{
    context::RequestContext,
    contest::{models::Participant, repository::ContestRepository, types::ContestResponse},
    stats::{build_snapshot, StatsClient, StatsSnapshot},
};

/// Lifecycle of one aggregation pass. Nothing is persisted; a failed pass is simply dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AggregationPhase {
    NotStarted,
    LoadingContest,
    FetchingStats,
    Ready,
    Failed,
}

impl AggregationPhase {
    fn advance(self, next: AggregationPhase, contest_id: &str) -> AggregationPhase {
        debug!(contest_id = %contest_id, from = %self, to = %next, "Aggregation phase changed");
        next
    }
}

/// Builds contest leaderboards from live external stats.
/// Each call is an independent pass; no results are cached between calls.
pub struct ContestAggregationService {
    contest_repository: Arc<dyn ContestRepository + Send + Sync>,
    stats_client: Arc<dyn StatsClient>,
    calculator: Arc<dyn ScoreCalculator>,
}

impl ContestAggregationService {
    pub fn builder(
        contest_repository: Arc<dyn ContestRepository + Send + Sync>,
        stats_client: Arc<dyn StatsClient>,
    ) -> ContestAggregationServiceBuilder {
        ContestAggregationServiceBuilder::new(contest_repository, stats_client)
    }

    /// Loads the contest, fetches every participant's stats concurrently and
    /// returns the ranked leaderboard together with the chart series.
    ///
    /// Only a missing contest or a storage failure aborts the pass. A participant
    /// whose stats cannot be fetched is left off the leaderboard and shown with
    /// zero counts in the chart.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id, viewer = ?ctx.user_id))]
    pub async fn aggregate(
        &self,
        ctx: &RequestContext,
        contest_id: &str,
    ) -> Result<ContestLeaderboard, AggregationError> {
        let mut phase =
            AggregationPhase::NotStarted.advance(AggregationPhase::LoadingContest, contest_id);

        let contest = match self.contest_repository.get_contest(contest_id).await {
            Ok(Some(contest)) => contest,
            Ok(None) => {
                phase.advance(AggregationPhase::Failed, contest_id);
                warn!(contest_id = %contest_id, "Contest not found for aggregation");
                return Err(AggregationError::ContestNotFound(contest_id.to_string()));
            }
            Err(err) => {
                phase.advance(AggregationPhase::Failed, contest_id);
                return Err(err.into());
            }
        };

        let participants = match self.contest_repository.list_participants(contest_id).await {
            Ok(participants) => participants,
            Err(err) => {
                phase.advance(AggregationPhase::Failed, contest_id);
                return Err(err.into());
            }
        };

        phase = phase.advance(AggregationPhase::FetchingStats, contest_id);
        let captured_at = Utc::now();
        let snapshots = self.fetch_snapshots(&participants, captured_at).await;

        let participant_count = participants.len();
        let scored = ranker::score_entries(
            self.calculator.as_ref(),
            participants.into_iter().zip(snapshots).collect(),
        );
        let leaderboard = ranker::rank(&scored);
        let chart_series = chart::project(
            scored
                .iter()
                .map(|entry| (&entry.participant, entry.snapshot.as_ref())),
        );

        phase.advance(AggregationPhase::Ready, contest_id);
        info!(
            contest_id = %contest_id,
            participants = participant_count,
            ranked = leaderboard.len(),
            "Leaderboard aggregated"
        );

        Ok(ContestLeaderboard {
            contest: ContestResponse::from_model(contest, participant_count as i64, captured_at),
            leaderboard,
            chart_series,
            captured_at,
        })
    }

    /// Fans out one fetch per participant and joins them all. The result is
    /// aligned with `participants`; `None` marks a skipped or failed fetch.
    async fn fetch_snapshots(
        &self,
        participants: &[Participant],
        captured_at: DateTime<Utc>,
    ) -> Vec<Option<StatsSnapshot>> {
        let fetches = participants.iter().map(|participant| async move {
            let Some(username) = participant.stats_username() else {
                debug!(user_id = %participant.user_id, "No external username, skipping stats");
                return None;
            };

            match self.stats_client.fetch(username).await {
                Ok(stats) => {
                    let snapshot = build_snapshot(&participant.user_id, &stats, captured_at);
                    if !snapshot.is_consistent() {
                        debug!(
                            user_id = %participant.user_id,
                            total_solved = snapshot.total_solved,
                            easy = snapshot.easy_solved,
                            medium = snapshot.medium_solved,
                            hard = snapshot.hard_solved,
                            "Provider total does not match difficulty counts"
                        );
                    }
                    Some(snapshot)
                }
                Err(err) => {
                    warn!(
                        user_id = %participant.user_id,
                        username = %username,
                        error = %err,
                        "Stats unavailable, participant left off the leaderboard"
                    );
                    None
                }
            }
        });

        join_all(fetches).await
    }
}

pub struct ContestAggregationServiceBuilder {
    contest_repository: Arc<dyn ContestRepository + Send + Sync>,
    stats_client: Arc<dyn StatsClient>,
    calculator: Arc<dyn ScoreCalculator>,
}

impl ContestAggregationServiceBuilder {
    fn new(
        contest_repository: Arc<dyn ContestRepository + Send + Sync>,
        stats_client: Arc<dyn StatsClient>,
    ) -> Self {
        Self {
            contest_repository,
            stats_client,
            calculator: Arc::new(DifficultyWeightedCalculator::new()),
        }
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ScoreCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn build(self) -> ContestAggregationService {
        ContestAggregationService {
            contest_repository: self.contest_repository,
            stats_client: self.stats_client,
            calculator: self.calculator,
        }
    }
}
