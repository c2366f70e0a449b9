use std::sync::Arc;

use axum::Router;
use leetboard::{
    create_router, AppState, ContestAggregationService, ContestRepository,
    InMemoryContestRepository, InMemoryProfileRepository, ProfileRepository,
};
use tokio::time::Duration;

use super::mocks::MockStatsClient;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub router: Router,
    pub stats: MockStatsClient,
}

pub struct TestSetupBuilder {
    stats_delay: Option<Duration>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { stats_delay: None }
    }

    /// Makes every stats fetch take at least `delay`
    #[allow(dead_code)]
    pub fn with_stats_delay(mut self, delay: Duration) -> Self {
        self.stats_delay = Some(delay);
        self
    }

    pub fn build(self) -> TestSetup {
        let profile_repository: Arc<dyn ProfileRepository + Send + Sync> =
            Arc::new(InMemoryProfileRepository::new());
        let contest_repository: Arc<dyn ContestRepository + Send + Sync> =
            Arc::new(InMemoryContestRepository::new(profile_repository.clone()));

        let mut stats = MockStatsClient::new();
        if let Some(delay) = self.stats_delay {
            stats = stats.with_delay(delay);
        }

        let aggregation_service = Arc::new(
            ContestAggregationService::builder(contest_repository.clone(), Arc::new(stats.clone()))
                .build(),
        );
        let state = AppState::new(contest_repository, profile_repository, aggregation_service);

        TestSetup {
            router: create_router(state),
            stats,
        }
    }
}
