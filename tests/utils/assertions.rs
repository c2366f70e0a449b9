//! Test assertion helpers - fluent API for verifying leaderboard results
#![allow(dead_code)] // Test utilities may not all be used in every test

use leetboard::ContestLeaderboard;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct LeaderboardAssertion<'a> {
    result: &'a ContestLeaderboard,
}

impl<'a> LeaderboardAssertion<'a> {
    pub fn new(result: &'a ContestLeaderboard) -> Self {
        Self { result }
    }

    /// Leaderboard rows in order, by display name
    pub fn ranked(self, expected: &[&str]) -> Self {
        let names: Vec<&str> = self
            .result
            .leaderboard
            .iter()
            .map(|row| row.display_name.as_str())
            .collect();
        assert_eq!(names, expected, "unexpected leaderboard order");
        self
    }

    pub fn scores(self, expected: &[i64]) -> Self {
        let scores: Vec<i64> = self.result.leaderboard.iter().map(|row| row.score).collect();
        assert_eq!(scores, expected, "unexpected scores");
        self
    }

    /// Ranks run 1..=n with no gaps or shared positions, scores never increase
    pub fn ranks_are_well_formed(self) -> Self {
        for (position, row) in self.result.leaderboard.iter().enumerate() {
            assert_eq!(row.rank as usize, position + 1, "rank gap at {}", row.display_name);
            assert!(row.score >= 0, "negative score for {}", row.display_name);
        }
        for pair in self.result.leaderboard.windows(2) {
            assert!(pair[0].score >= pair[1].score, "scores out of order");
        }
        self
    }

    /// Chart bars in order, by name
    pub fn charted(self, expected: &[&str]) -> Self {
        let names: Vec<&str> = self
            .result
            .chart_series
            .iter()
            .map(|point| point.name.as_str())
            .collect();
        assert_eq!(names, expected, "unexpected chart series");
        self
    }

    pub fn chart_counts(self, name: &str, easy: i64, medium: i64, hard: i64) -> Self {
        let point = self
            .result
            .chart_series
            .iter()
            .find(|point| point.name == name)
            .unwrap_or_else(|| panic!("{} should be in the chart", name));
        assert_eq!(
            (point.easy_solved, point.medium_solved, point.hard_solved),
            (easy, medium, hard),
            "unexpected chart counts for {}",
            name
        );
        self
    }
}
