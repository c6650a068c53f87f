//! Behavioural properties of the call query engine, checked against the
//! bundled data file and small hand-built collections.

use std::path::Path;

use callboard_core::{
    aggregate, decode_calls, filter_and_sort, CallRecord, CallStatus, Outcome, OutcomeFilter,
    SortKey, ViewParameters,
};

fn bundled_calls() -> Vec<CallRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/calls.json");
    let src = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    let doc: serde_json::Value = serde_json::from_str(&src).unwrap();
    decode_calls(&doc).unwrap().into_strict().unwrap()
}

fn call(id: &str, name: &str, outcome: Outcome, duration: u64) -> CallRecord {
    CallRecord {
        id: id.to_string(),
        prospect_name: name.to_string(),
        date: "2024-01-01T00:00:00Z".to_string(),
        duration,
        status: CallStatus::Completed,
        outcome,
        talk_time_ratio: 0.5,
        questions_asked: 5,
        sentiment_score: 0.5,
        notes: None,
        tags: Vec::new(),
    }
}

/// Every parameter combination the list page can produce.
fn all_parameters() -> Vec<ViewParameters> {
    let mut filters = vec![OutcomeFilter::All];
    filters.extend(Outcome::ALL.into_iter().map(OutcomeFilter::Only));

    let mut params = Vec::new();
    for term in ["", "acme", "ENTERPRISE", "demo", "zzz"] {
        for filter in &filters {
            for key in SortKey::ALL {
                params.push(
                    ViewParameters::new()
                        .with_search(term)
                        .with_outcome(*filter)
                        .with_sort(key),
                );
            }
        }
    }
    params
}

#[test]
fn bundled_data_decodes_cleanly() {
    let calls = bundled_calls();
    assert_eq!(calls.len(), 8);
}

#[test]
fn results_are_drawn_from_the_input_and_satisfy_the_predicate() {
    let calls = bundled_calls();
    for params in all_parameters() {
        let result = filter_and_sort(&calls, &params);
        for record in &result {
            assert!(
                calls.iter().any(|c| std::ptr::eq(c, *record)),
                "record {} not borrowed from input",
                record.id
            );
            assert!(params.matches(record), "{:?} fails {:?}", record.id, params);
        }
        let expected = calls.iter().filter(|c| params.matches(c)).count();
        assert_eq!(result.len(), expected);
    }
}

#[test]
fn reapplying_parameters_is_idempotent() {
    let calls = bundled_calls();
    for params in all_parameters() {
        let once: Vec<CallRecord> = filter_and_sort(&calls, &params)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_and_sort(&once, &params);
        let once_ids: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(once_ids, twice_ids, "{:?}", params);
    }
}

#[test]
fn date_sort_is_non_increasing() {
    let calls = bundled_calls();
    let sorted = filter_and_sort(&calls, &ViewParameters::new().with_sort(SortKey::Date));
    for pair in sorted.windows(2) {
        let a = pair[0].timestamp().unwrap();
        let b = pair[1].timestamp().unwrap();
        assert!(a >= b, "{} before {}", pair[0].date, pair[1].date);
    }
    assert_eq!(sorted[0].id, "8");
}

#[test]
fn search_is_case_insensitive() {
    let calls = vec![call("1", "Acme Corp", Outcome::Qualified, 600)];
    for term in ["acme", "ACME", "aCmE corp"] {
        let result = filter_and_sort(&calls, &ViewParameters::new().with_search(term));
        assert_eq!(result.len(), 1, "term {:?}", term);
    }
}

#[test]
fn search_covers_notes_and_tags() {
    let calls = bundled_calls();
    // "Acme" appears in one prospect name and in Hooli's notes.
    let ids: Vec<&str> = filter_and_sort(&calls, &ViewParameters::new().with_search("acme"))
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["7", "1"]);

    let tagged = filter_and_sort(&calls, &ViewParameters::new().with_search("AI-COACH"));
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].prospect_name, "Umbrella Health");
}

#[test]
fn missing_outcome_yields_empty_result() {
    let calls = vec![
        call("1", "A", Outcome::Qualified, 600),
        call("2", "B", Outcome::ClosedWon, 600),
    ];
    let params = ViewParameters::new().with_outcome("follow-up".parse::<OutcomeFilter>().unwrap());
    assert!(filter_and_sort(&calls, &params).is_empty());
}

#[test]
fn aggregate_scenarios() {
    let empty = aggregate(&[] as &[CallRecord]);
    assert_eq!(empty.total, 0);
    assert_eq!(empty.qualified_count, 0);
    assert_eq!(empty.avg_duration_minutes, 0.0);
    assert_eq!(empty.avg_sentiment, 0.0);

    let calls = vec![
        call("1", "A", Outcome::Qualified, 600),
        call("2", "B", Outcome::NotQualified, 1200),
        call("3", "C", Outcome::ClosedWon, 1800),
    ];
    let stats = aggregate(&calls);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.qualified_count, 2);
    assert!((stats.avg_duration_minutes - 20.0).abs() < 1e-9);
}

#[test]
fn aggregate_over_filtered_view() {
    let calls = bundled_calls();
    let enterprise = filter_and_sort(&calls, &ViewParameters::new().with_search("enterprise"));
    let stats = aggregate(enterprise.iter().copied());
    assert_eq!(stats.total, 3);
    assert_eq!(stats.qualified_count, 2);
    assert!(stats.total <= aggregate(&calls).total);
}
