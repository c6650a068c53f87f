//! View parameters: the immutable description of one list query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{CallRecord, Outcome};

/// Restrict results to one outcome, or keep all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeFilter {
    #[default]
    All,
    Only(Outcome),
}

impl OutcomeFilter {
    pub fn admits(self, outcome: Outcome) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Only(wanted) => wanted == outcome,
        }
    }
}

impl fmt::Display for OutcomeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeFilter::All => f.write_str("all"),
            OutcomeFilter::Only(outcome) => f.write_str(outcome.as_str()),
        }
    }
}

impl FromStr for OutcomeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(OutcomeFilter::All)
        } else {
            s.parse().map(OutcomeFilter::Only)
        }
    }
}

impl From<Outcome> for OutcomeFilter {
    fn from(outcome: Outcome) -> Self {
        OutcomeFilter::Only(outcome)
    }
}

/// Ordering applied to a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Date,
    /// Prospect name, A to Z.
    Name,
    /// Longest first.
    Duration,
    /// Highest sentiment first.
    Sentiment,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Date,
        SortKey::Name,
        SortKey::Duration,
        SortKey::Sentiment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Name => "name",
            SortKey::Duration => "duration",
            SortKey::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

/// Search term, outcome filter, and sort key for one query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParameters {
    pub search_term: String,
    pub outcome_filter: OutcomeFilter,
    pub sort_key: SortKey,
}

impl ViewParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_outcome(mut self, filter: impl Into<OutcomeFilter>) -> Self {
        self.outcome_filter = filter.into();
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Whether `record` passes both the outcome filter and the search term.
    ///
    /// The search is a case-insensitive substring match against the
    /// prospect name, the notes, and every tag.
    pub fn matches(&self, record: &CallRecord) -> bool {
        if !self.outcome_filter.admits(record.outcome) {
            return false;
        }
        if self.search_term.is_empty() {
            return true;
        }

        let needle = self.search_term.to_lowercase();
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

        hit(record.prospect_name.as_str())
            || record.notes.as_deref().is_some_and(hit)
            || record.tags.iter().any(|tag| hit(tag.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_filter_parses_all_and_outcomes() {
        assert_eq!("all".parse::<OutcomeFilter>().unwrap(), OutcomeFilter::All);
        assert_eq!(
            "follow-up".parse::<OutcomeFilter>().unwrap(),
            OutcomeFilter::Only(Outcome::FollowUp)
        );
        assert!("qualified-ish".parse::<OutcomeFilter>().is_err());
        assert_eq!(OutcomeFilter::Only(Outcome::ClosedLost).to_string(), "closed-lost");
    }

    #[test]
    fn sort_key_parses() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!(SortKey::default(), SortKey::Date);
        assert!("oldest".parse::<SortKey>().is_err());
    }

    #[test]
    fn builder_sets_every_field() {
        let params = ViewParameters::new()
            .with_search("acme")
            .with_outcome(Outcome::Qualified)
            .with_sort(SortKey::Name);
        assert_eq!(params.search_term, "acme");
        assert_eq!(params.outcome_filter, OutcomeFilter::Only(Outcome::Qualified));
        assert_eq!(params.sort_key, SortKey::Name);
    }
}
