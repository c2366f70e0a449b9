// Public API - what other modules can use
pub use errors::AggregationError;
pub use handlers::get_leaderboard;
pub use models::{ChartSeriesPoint, ContestLeaderboard, LeaderboardEntry, ScoredEntry};
pub use service::{AggregationPhase, ContestAggregationService, ContestAggregationServiceBuilder};

// Internal modules
pub mod calculators;
pub mod chart;
mod errors;
mod handlers;
mod models;
pub mod ranker;
mod service;
