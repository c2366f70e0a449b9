pub mod actions;
pub mod assertions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::LeaderboardAssertion;
#[allow(unused_imports)]
pub use mocks::MockStatsClient;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
