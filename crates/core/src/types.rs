//! Typed call records and the API response envelope.
//!
//! Field names follow the camelCase JSON produced by the dashboard's data
//! file, so a `CallRecord` serializes back to exactly the shape it was
//! decoded from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Lifecycle status of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Completed,
    Scheduled,
    Cancelled,
}

impl CallStatus {
    pub const ALL: [CallStatus; 3] = [
        CallStatus::Completed,
        CallStatus::Scheduled,
        CallStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CallStatus::Completed => "completed",
            CallStatus::Scheduled => "scheduled",
            CallStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown call status '{}'", s))
    }
}

/// Categorical result of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Qualified,
    NotQualified,
    FollowUp,
    ClosedWon,
    ClosedLost,
}

impl Outcome {
    pub const ALL: [Outcome; 5] = [
        Outcome::Qualified,
        Outcome::NotQualified,
        Outcome::FollowUp,
        Outcome::ClosedWon,
        Outcome::ClosedLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Qualified => "qualified",
            Outcome::NotQualified => "not-qualified",
            Outcome::FollowUp => "follow-up",
            Outcome::ClosedWon => "closed-won",
            Outcome::ClosedLost => "closed-lost",
        }
    }

    /// Outcomes that count toward the qualified totals.
    pub fn is_qualified(self) -> bool {
        matches!(self, Outcome::Qualified | Outcome::ClosedWon)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == s)
            .ok_or_else(|| format!("unknown outcome '{}'", s))
    }
}

/// One logged sales call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: String,
    pub prospect_name: String,
    /// ISO 8601 timestamp string; see [`parse_timestamp`].
    pub date: String,
    /// Call length in seconds.
    pub duration: u64,
    pub status: CallStatus,
    pub outcome: Outcome,
    pub talk_time_ratio: f64,
    pub questions_asked: u32,
    pub sentiment_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CallRecord {
    /// Parsed call time, or `None` when `date` is not a recognised timestamp.
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        parse_timestamp(&self.date)
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration as f64 / 60.0
    }
}

/// Parse a call timestamp.
///
/// Accepts RFC 3339, a date-time without offset (read as UTC), or a bare
/// calendar date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let naive_fraction =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    for format in [naive, naive_fraction] {
        if let Ok(ts) = PrimitiveDateTime::parse(raw, format) {
            return Some(ts.assume_utc());
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Response envelope shared by every `/api` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data,
            success: true,
            error: None,
        }
    }

    pub fn failure(data: T, error: impl Into<String>) -> Self {
        ApiResponse {
            data,
            success: false,
            error: Some(error.into()),
        }
    }

    /// Unwrap the envelope, turning `success=false` into its error message.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or_else(|| "request failed".to_string()))
        }
    }
}
