pub mod client;
pub mod snapshot;

mod errors;
pub mod models;

pub use client::{HttpStatsClient, StatsClient};
pub use errors::StatsError;
pub use models::{StatsResult, StatsSnapshot};
pub use snapshot::build_snapshot;
