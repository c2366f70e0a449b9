use super::models::ChartSeriesPoint;
use crate::contest::models::Participant;
use crate::stats::StatsSnapshot;

/// One chart point per named participant, in input order.
/// Participants without a snapshot still get a bar, with all counts at zero.
pub fn project<'a, I>(entries: I) -> Vec<ChartSeriesPoint>
where
    I: IntoIterator<Item = (&'a Participant, Option<&'a StatsSnapshot>)>,
{
    entries
        .into_iter()
        .filter(|(participant, _)| !participant.display_name.trim().is_empty())
        .map(|(participant, snapshot)| {
            let count = |pick: fn(&StatsSnapshot) -> i64| snapshot.map(pick).unwrap_or(0).max(0);

            ChartSeriesPoint {
                name: participant.display_name.clone(),
                easy_solved: count(|s| s.easy_solved),
                medium_solved: count(|s| s.medium_solved),
                hard_solved: count(|s| s.hard_solved),
            }
        })
        .collect()
}
