use super::calculators::ScoreCalculator;
use super::models::{LeaderboardEntry, ScoredEntry};
use crate::contest::models::Participant;
use crate::stats::StatsSnapshot;

/// Pairs each participant with its snapshot and score. Participants without a snapshot score 0.
pub fn score_entries(
    calculator: &dyn ScoreCalculator,
    participants: Vec<(Participant, Option<StatsSnapshot>)>,
) -> Vec<ScoredEntry> {
    participants
        .into_iter()
        .map(|(participant, snapshot)| ScoredEntry {
            score: snapshot
                .as_ref()
                .map(|s| calculator.calculate(s))
                .unwrap_or_default(),
            participant,
            snapshot,
        })
        .collect()
}

/// Ranks entries by score, highest first.
///
/// Entries without a snapshot are left out. Equal scores keep their input
/// order, and every row gets its own rank (`position + 1`), so two tied
/// entries are ranked 1 and 2 rather than sharing a rank.
pub fn rank(entries: &[ScoredEntry]) -> Vec<LeaderboardEntry> {
    let mut with_stats: Vec<(&ScoredEntry, &StatsSnapshot)> = entries
        .iter()
        .filter_map(|entry| entry.snapshot.as_ref().map(|snapshot| (entry, snapshot)))
        .collect();

    // `sort_by` is stable
    with_stats.sort_by(|(a, _), (b, _)| b.score.cmp(&a.score));

    with_stats
        .into_iter()
        .enumerate()
        .map(|(position, (entry, snapshot))| LeaderboardEntry {
            rank: position as u32 + 1,
            user_id: entry.participant.user_id.clone(),
            display_name: entry.participant.display_name.clone(),
            total_solved: snapshot.total_solved,
            easy_solved: snapshot.easy_solved,
            medium_solved: snapshot.medium_solved,
            hard_solved: snapshot.hard_solved,
            score: entry.score,
        })
        .collect()
}
