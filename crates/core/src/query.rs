//! The call query engine: filter and sort a collection for display.
//!
//! Every function here is pure. Records are borrowed from the caller's
//! collection and never modified; results are fresh vectors of references
//! so a caller can map them back to the source without cloning.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::CallRecord;
use crate::view::{SortKey, ViewParameters};

/// Records that satisfy `params`, in input order.
pub fn filter<'a>(calls: &'a [CallRecord], params: &ViewParameters) -> Vec<&'a CallRecord> {
    calls.iter().filter(|call| params.matches(call)).collect()
}

/// Stable in-place sort by `key`.
///
/// Calls whose `date` does not parse sort after every dated call when
/// sorting by date, keeping their relative order.
pub fn sort(calls: &mut [&CallRecord], key: SortKey) {
    match key {
        SortKey::Date => {
            // Keyed once so each timestamp is parsed a single time.
            let mut keyed: Vec<_> = calls.iter().map(|c| (c.timestamp(), *c)).collect();
            keyed.sort_by(|(a, _), (b, _)| match (a, b) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
            for (slot, (_, call)) in calls.iter_mut().zip(keyed) {
                *slot = call;
            }
        }
        SortKey::Name => calls.sort_by_cached_key(|c| NameKey::new(&c.prospect_name)),
        SortKey::Duration => calls.sort_by(|a, b| b.duration.cmp(&a.duration)),
        SortKey::Sentiment => {
            calls.sort_by(|a, b| b.sentiment_score.total_cmp(&a.sentiment_score))
        }
    }
}

/// Filter by `params`, then sort by `params.sort_key`.
pub fn filter_and_sort<'a>(
    calls: &'a [CallRecord],
    params: &ViewParameters,
) -> Vec<&'a CallRecord> {
    let mut selected = filter(calls, params);
    sort(&mut selected, params.sort_key);
    selected
}

/// Owned variant of [`filter_and_sort`] for callers that hand the result
/// across an API boundary.
pub fn filter_and_sort_owned(calls: &[CallRecord], params: &ViewParameters) -> Vec<CallRecord> {
    filter_and_sort(calls, params).into_iter().cloned().collect()
}

/// Collation key for prospect names, compared level by level: base
/// letters with accents and case folded away, then accents, then case with
/// lowercase first, then the exact string.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct NameKey {
    base: String,
    accented: String,
    uppercase: Vec<bool>,
    exact: String,
}

impl NameKey {
    fn new(name: &str) -> Self {
        let decomposed: String = name.nfd().collect();
        NameKey {
            base: decomposed
                .chars()
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
                .collect(),
            accented: decomposed.chars().flat_map(char::to_lowercase).collect(),
            uppercase: decomposed.chars().map(char::is_uppercase).collect(),
            exact: name.to_string(),
        }
    }
}
