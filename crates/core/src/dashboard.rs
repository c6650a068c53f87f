//! Dashboard snapshot: headline stats, chart datasets, and the call preview.
//!
//! Chart datasets are computed over the whole collection; only the call
//! preview honours the [`DashboardFilter`]. Time-relative filtering takes
//! `now` explicitly so the snapshot stays a pure function of its inputs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::format::short_day;
use crate::stats::{aggregate, AggregateStats};
use crate::types::{CallRecord, Outcome};

/// Number of calls shown before "show all".
pub const PREVIEW_LIMIT: usize = 6;
/// Calls newer than this count as recent.
pub const RECENT_WINDOW: Duration = Duration::days(7);
/// Days kept in the daily trend.
pub const DAILY_TREND_DAYS: usize = 10;
/// Calls kept in the sentiment trend.
pub const SENTIMENT_TREND_CALLS: usize = 15;

/// Quick filter offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardFilter {
    #[default]
    All,
    /// `qualified` and `closed-won` outcomes.
    Qualified,
    /// Calls within [`RECENT_WINDOW`] of `now`.
    Recent,
}

impl DashboardFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            DashboardFilter::All => "all",
            DashboardFilter::Qualified => "qualified",
            DashboardFilter::Recent => "recent",
        }
    }

    /// Calls admitted by this filter, in input order.
    ///
    /// Calls with an unparsable date are never recent.
    pub fn apply<'a>(self, calls: &'a [CallRecord], now: OffsetDateTime) -> Vec<&'a CallRecord> {
        let cutoff = now - RECENT_WINDOW;
        calls
            .iter()
            .filter(|call| match self {
                DashboardFilter::All => true,
                DashboardFilter::Qualified => call.outcome.is_qualified(),
                DashboardFilter::Recent => call.timestamp().is_some_and(|ts| ts > cutoff),
            })
            .collect()
    }
}

impl fmt::Display for DashboardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DashboardFilter::All),
            "qualified" => Ok(DashboardFilter::Qualified),
            "recent" => Ok(DashboardFilter::Recent),
            other => Err(format!("unknown dashboard filter '{}'", other)),
        }
    }
}

/// One slice of the outcome pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSlice {
    pub name: String,
    pub value: usize,
}

/// One bar of the duration histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBucket {
    pub range: String,
    pub count: usize,
}

/// Qualified vs. not-qualified calls on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    /// ISO calendar day, `YYYY-MM-DD`.
    pub day: String,
    /// Axis label, e.g. `Jan 15`.
    pub label: String,
    pub qualified: usize,
    pub not_qualified: usize,
    pub total: usize,
}

/// One point of the sentiment/duration line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentPoint {
    /// 1-based position within the window.
    pub call: usize,
    /// Sentiment as a rounded percentage.
    pub sentiment: i64,
    /// Duration in rounded minutes.
    pub duration: i64,
}

/// Call counts per outcome, in order of first appearance.
pub fn outcome_distribution<'a, I>(calls: I) -> Vec<OutcomeSlice>
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut counts: Vec<(Outcome, usize)> = Vec::new();
    for call in calls {
        match counts.iter_mut().find(|(o, _)| *o == call.outcome) {
            Some((_, n)) => *n += 1,
            None => counts.push((call.outcome, 1)),
        }
    }
    counts
        .into_iter()
        .map(|(outcome, value)| OutcomeSlice {
            name: outcome.chart_label(),
            value,
        })
        .collect()
}

const DURATION_BUCKETS: [(&str, f64); 4] = [
    ("0-15m", 15.0),
    ("15-30m", 30.0),
    ("30-45m", 45.0),
    ("45-60m", 60.0),
];
const OVERFLOW_BUCKET: &str = "60m+";

/// Histogram of call length; every bucket is present even when empty.
pub fn duration_distribution<'a, I>(calls: I) -> Vec<DurationBucket>
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut counts = [0usize; DURATION_BUCKETS.len() + 1];
    for call in calls {
        let minutes = call.duration_minutes();
        let slot = DURATION_BUCKETS
            .iter()
            .position(|(_, upper)| minutes <= *upper)
            .unwrap_or(DURATION_BUCKETS.len());
        counts[slot] += 1;
    }

    DURATION_BUCKETS
        .iter()
        .map(|(range, _)| *range)
        .chain(std::iter::once(OVERFLOW_BUCKET))
        .zip(counts)
        .map(|(range, count)| DurationBucket {
            range: range.to_string(),
            count,
        })
        .collect()
}

/// Per-day qualified/not-qualified counts for the most recent
/// [`DAILY_TREND_DAYS`] days that have calls, oldest first.
pub fn daily_trend<'a, I>(calls: I) -> Vec<DailyPoint>
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut days: BTreeMap<Date, (usize, usize)> = BTreeMap::new();
    for call in calls {
        let Some(ts) = call.timestamp() else {
            continue;
        };
        let entry = days.entry(ts.to_offset(UtcOffset::UTC).date()).or_default();
        if call.outcome.is_qualified() {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let skip = days.len().saturating_sub(DAILY_TREND_DAYS);
    days.into_iter()
        .skip(skip)
        .map(|(day, (qualified, not_qualified))| DailyPoint {
            day: day.to_string(),
            label: short_day(day.midnight().assume_utc()),
            qualified,
            not_qualified,
            total: qualified + not_qualified,
        })
        .collect()
}

/// The last [`SENTIMENT_TREND_CALLS`] calls in input order.
pub fn sentiment_trend(calls: &[CallRecord]) -> Vec<SentimentPoint> {
    let start = calls.len().saturating_sub(SENTIMENT_TREND_CALLS);
    calls[start..]
        .iter()
        .enumerate()
        .map(|(i, call)| SentimentPoint {
            call: i + 1,
            sentiment: (call.sentiment_score * 100.0).round() as i64,
            duration: call.duration_minutes().round() as i64,
        })
        .collect()
}

/// All chart datasets for one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub outcomes: Vec<OutcomeSlice>,
    pub durations: Vec<DurationBucket>,
    pub daily: Vec<DailyPoint>,
    pub sentiment: Vec<SentimentPoint>,
}

impl Charts {
    pub fn build(calls: &[CallRecord]) -> Self {
        Charts {
            outcomes: outcome_distribution(calls),
            durations: duration_distribution(calls),
            daily: daily_trend(calls),
            sentiment: sentiment_trend(calls),
        }
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub filter: DashboardFilter,
    pub stats: AggregateStats,
    pub charts: Charts,
    /// Calls admitted by `filter`, before the preview cut.
    pub matching: usize,
    pub calls: Vec<CallRecord>,
}

impl Dashboard {
    pub fn build(
        calls: &[CallRecord],
        filter: DashboardFilter,
        show_all: bool,
        now: OffsetDateTime,
    ) -> Self {
        let selected = filter.apply(calls, now);
        let matching = selected.len();
        let shown = if show_all {
            matching
        } else {
            matching.min(PREVIEW_LIMIT)
        };

        Dashboard {
            filter,
            stats: aggregate(calls),
            charts: Charts::build(calls),
            matching,
            calls: selected.into_iter().take(shown).cloned().collect(),
        }
    }
}
