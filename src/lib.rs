// Library crate for the contest leaderboard server
// This file exposes the public API for integration tests

pub mod config;
pub mod contest;
pub mod context;
pub mod leaderboard;
pub mod profile;
pub mod routes;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use contest::repository::{ContestRepository, InMemoryContestRepository};
pub use context::{RequestContext, USER_ID_HEADER};
pub use leaderboard::{ContestAggregationService, ContestLeaderboard, LeaderboardEntry};
pub use profile::repository::{InMemoryProfileRepository, ProfileRepository};
pub use routes::create_router;
pub use shared::{AppError, AppState};
pub use stats::{HttpStatsClient, StatsClient, StatsError, StatsResult};
