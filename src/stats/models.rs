use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Problem-solving statistics as reported by the external provider.
/// Missing or null numeric fields decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsResult {
    #[serde(deserialize_with = "null_as_default")]
    pub total_solved: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub easy_solved: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub medium_solved: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hard_solved: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub acceptance_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ranking: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Immutable record of one participant's statistics at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub id: String,
    pub owner_id: String,
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub acceptance_rate: f64,
    pub ranking: i64,
    pub captured_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Whether the provider's total agrees with the per-difficulty counts.
    /// The engine tolerates a mismatch; this is only used for diagnostics.
    /// Counts whose sum overflows `i64` are never consistent.
    pub fn is_consistent(&self) -> bool {
        self.easy_solved
            .checked_add(self.medium_solved)
            .and_then(|sum| sum.checked_add(self.hard_solved))
            == Some(self.total_solved)
    }
}
