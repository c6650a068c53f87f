//! Display helpers shared by the CLI and the dashboard payloads.

use time::{Month, OffsetDateTime};

use crate::types::{parse_timestamp, Outcome};

/// `m:ss`, e.g. 754 seconds -> `12:34`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `Mon D, YYYY` in UTC, or `Invalid Date` when `raw` does not parse.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => format!("{}, {}", short_day(ts), ts.year()),
        None => "Invalid Date".to_string(),
    }
}

/// `Mon D`, e.g. `Jan 15`.
pub fn short_day(ts: OffsetDateTime) -> String {
    format!("{} {}", month_abbrev(ts.month()), ts.day())
}

/// Ratio in `[0, 1]` as a rounded whole percentage, e.g. `0.456` -> `46%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

impl Outcome {
    /// Badge text: the first hyphen becomes a space (`closed won`).
    pub fn label(self) -> String {
        self.as_str().replacen('-', " ", 1)
    }

    /// Chart legend text: [`Outcome::label`] with a leading capital.
    pub fn chart_label(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(754), "12:34");
        assert_eq!(format_duration(3725), "62:05");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2024-01-15T10:30:00Z"), "Jan 15, 2024");
        assert_eq!(format_date("2023-12-03"), "Dec 3, 2023");
        assert_eq!(format_date("soon"), "Invalid Date");
    }

    #[test]
    fn percents() {
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::ClosedWon.label(), "closed won");
        assert_eq!(Outcome::Qualified.label(), "qualified");
        assert_eq!(Outcome::NotQualified.chart_label(), "Not qualified");
        assert_eq!(Outcome::FollowUp.chart_label(), "Follow up");
    }
}
