//! Mock call collections for demos and empty environments.

use callboard_core::{CallRecord, CallStatus, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

const PROSPECTS: [&str; 10] = [
    "John Smith",
    "Sarah Johnson",
    "Mike Chen",
    "Emily Davis",
    "David Wilson",
    "Linda Garcia",
    "Tom Brown",
    "Anna Lee",
    "Chris Taylor",
    "Maria Rodriguez",
];

const TAG_SETS: [&[&str]; 5] = [
    &["enterprise", "ai-coaching"],
    &["mid-market", "follow-up"],
    &["small-business", "budget-constraint"],
    &["hot-lead"],
    &["enterprise", "demo"],
];

/// Calls are spread over this many days before `now`.
const SPREAD_DAYS: i64 = 30;

/// Generate `count` plausible calls dated within the last 30 days of `now`.
///
/// Durations run 5 to 65 minutes; talk-time ratios 0.2 to 1.0.
pub(crate) fn mock_calls<R: Rng>(rng: &mut R, count: usize, now: OffsetDateTime) -> Vec<CallRecord> {
    (0..count)
        .map(|i| {
            let age = Duration::seconds(rng.gen_range(0..SPREAD_DAYS * 24 * 60 * 60));
            let date = (now - age)
                .format(&Rfc3339)
                .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string());

            let outcome = *Outcome::ALL.choose(rng).unwrap_or(&Outcome::FollowUp);
            let tags = TAG_SETS
                .choose(rng)
                .map(|set| set.iter().map(|t| t.to_string()).collect())
                .unwrap_or_default();
            let prospect = PROSPECTS.choose(rng).copied().unwrap_or("Prospect");

            CallRecord {
                id: format!("call-{}", i),
                prospect_name: prospect.to_string(),
                date,
                duration: rng.gen_range(300..3900),
                status: CallStatus::Completed,
                outcome,
                talk_time_ratio: round_to(rng.gen_range(0.2..=1.0), 2),
                questions_asked: rng.gen_range(1..=15),
                sentiment_score: round_to(rng.gen::<f64>(), 2),
                notes: Some("Sample call notes...".to_string()),
                tags,
            }
        })
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard_core::decode_calls;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::datetime;

    #[test]
    fn generated_calls_pass_boundary_validation() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let calls = mock_calls(&mut StdRng::seed_from_u64(7), 50, now);
        let doc = serde_json::json!({ "calls": calls });
        let decoded = decode_calls(&doc).unwrap().into_strict().unwrap();
        assert_eq!(decoded.len(), 50);

        let cutoff = now - Duration::days(SPREAD_DAYS);
        for call in &decoded {
            let ts = call.timestamp().unwrap();
            assert!(ts <= now && ts > cutoff, "{} out of range", call.date);
            assert!((300..3900).contains(&call.duration));
            assert!((1..=15).contains(&call.questions_asked));
            assert!(!call.tags.is_empty());
        }
    }

    #[test]
    fn same_seed_same_calls() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let a = mock_calls(&mut StdRng::seed_from_u64(42), 10, now);
        let b = mock_calls(&mut StdRng::seed_from_u64(42), 10, now);
        assert_eq!(a, b);
    }
}
