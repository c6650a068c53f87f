//! Aggregate statistics over a sequence of calls.

use serde::{Deserialize, Serialize};

use crate::types::CallRecord;

/// Summary numbers for a set of calls. Empty input yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total: usize,
    /// Calls whose outcome is `qualified` or `closed-won`.
    pub qualified_count: usize,
    pub avg_duration_minutes: f64,
    pub avg_sentiment: f64,
    /// `qualified_count / total` as a percentage.
    pub qualified_rate: f64,
}

/// Compute [`AggregateStats`] over any sequence of calls.
///
/// Accepts owned records or references, so both a full collection and a
/// filtered view can be passed directly.
pub fn aggregate<'a, I>(calls: I) -> AggregateStats
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut total = 0usize;
    let mut qualified_count = 0usize;
    let mut duration_secs = 0u64;
    let mut sentiment = 0.0f64;

    for call in calls {
        total += 1;
        if call.outcome.is_qualified() {
            qualified_count += 1;
        }
        duration_secs = duration_secs.saturating_add(call.duration);
        sentiment += call.sentiment_score;
    }

    if total == 0 {
        return AggregateStats::default();
    }

    let n = total as f64;
    AggregateStats {
        total,
        qualified_count,
        avg_duration_minutes: duration_secs as f64 / 60.0 / n,
        avg_sentiment: sentiment / n,
        qualified_rate: qualified_count as f64 / n * 100.0,
    }
}
