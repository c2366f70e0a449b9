#![allow(dead_code)] // Not every test file uses every mock knob

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};

use leetboard::{StatsClient, StatsError, StatsResult};

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Clone)]
enum MockResponse {
    Stats(StatsResult),
    Failure(String),
}

/// Stats provider double. Unknown usernames answer like the real provider's 404.
#[derive(Clone)]
pub struct MockStatsClient {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    requested: Arc<RwLock<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockStatsClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            requested: Arc::new(RwLock::new(Vec::new())),
            delay: None,
        }
    }

    /// Every fetch sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_solved(&self, username: &str, easy: i64, medium: i64, hard: i64) {
        self.set_stats(
            username,
            StatsResult {
                total_solved: easy + medium + hard,
                easy_solved: easy,
                medium_solved: medium,
                hard_solved: hard,
                acceptance_rate: 61.5,
                ranking: 120_000,
            },
        )
        .await;
    }

    pub async fn set_stats(&self, username: &str, stats: StatsResult) {
        self.responses
            .write()
            .await
            .insert(username.to_string(), MockResponse::Stats(stats));
    }

    pub async fn set_failure(&self, username: &str, cause: &str) {
        self.responses
            .write()
            .await
            .insert(username.to_string(), MockResponse::Failure(cause.to_string()));
    }

    pub async fn requested_usernames(&self) -> Vec<String> {
        let mut requested = self.requested.read().await.clone();
        requested.sort();
        requested
    }

    pub async fn clear_requests(&self) {
        self.requested.write().await.clear();
    }
}

#[async_trait]
impl StatsClient for MockStatsClient {
    async fn fetch(&self, username: &str) -> Result<StatsResult, StatsError> {
        self.requested.write().await.push(username.to_string());

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        match self.responses.read().await.get(username).cloned() {
            Some(MockResponse::Stats(stats)) => Ok(stats),
            Some(MockResponse::Failure(cause)) => Err(StatsError::unavailable(username, cause)),
            None => Err(StatsError::unavailable(
                username,
                "provider responded with 404 Not Found",
            )),
        }
    }
}
