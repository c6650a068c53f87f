//! Application state shared across request handlers.

use std::sync::Arc;

use callboard_core::{OutcomeFilter, SortKey, ViewParameters};
use callboard_storage::CallSource;
use serde::Deserialize;

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// Read-only call collection.
    pub(crate) source: Arc<dyn CallSource>,
}

impl AppState {
    pub(crate) fn new(source: Arc<dyn CallSource>) -> Self {
        AppState { source }
    }
}

/// Query string accepted by the list and stats routes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ViewQuery {
    pub(crate) search: Option<String>,
    pub(crate) outcome: Option<String>,
    pub(crate) sort: Option<String>,
}

impl ViewQuery {
    /// True when the client asked for the raw collection.
    pub(crate) fn is_empty(&self) -> bool {
        self.search.is_none() && self.outcome.is_none() && self.sort.is_none()
    }

    /// The filter half of the query plus the sort key, if one was given.
    ///
    /// An absent sort leaves calls in collection order.
    pub(crate) fn view(&self) -> Result<(ViewParameters, Option<SortKey>), String> {
        let outcome_filter: OutcomeFilter = match &self.outcome {
            Some(o) => o.parse()?,
            None => OutcomeFilter::All,
        };
        let sort_key: Option<SortKey> = match &self.sort {
            Some(s) => Some(s.parse()?),
            None => None,
        };

        let mut params = ViewParameters::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_outcome(outcome_filter);
        if let Some(key) = sort_key {
            params = params.with_sort(key);
        }
        Ok((params, sort_key))
    }
}

/// Query string accepted by the dashboard route.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    pub(crate) filter: Option<String>,
    #[serde(default)]
    pub(crate) show_all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard_core::Outcome;

    #[test]
    fn empty_query_means_raw_collection() {
        assert!(ViewQuery::default().is_empty());
        let query = ViewQuery {
            search: Some(String::new()),
            ..ViewQuery::default()
        };
        assert!(!query.is_empty());
    }

    #[test]
    fn view_parses_outcome_and_optional_sort() {
        let query = ViewQuery {
            search: Some("acme".to_string()),
            outcome: Some("closed-won".to_string()),
            sort: None,
        };
        let (params, sort) = query.view().unwrap();
        assert_eq!(params.search_term, "acme");
        assert_eq!(params.outcome_filter, OutcomeFilter::Only(Outcome::ClosedWon));
        assert_eq!(sort, None);

        let query = ViewQuery {
            sort: Some("sentiment".to_string()),
            ..ViewQuery::default()
        };
        let (params, sort) = query.view().unwrap();
        assert_eq!(sort, Some(SortKey::Sentiment));
        assert_eq!(params.sort_key, SortKey::Sentiment);
    }

    #[test]
    fn view_rejects_unknown_values() {
        let query = ViewQuery {
            outcome: Some("won".to_string()),
            ..ViewQuery::default()
        };
        assert!(query.view().is_err());

        let query = ViewQuery {
            sort: Some("random".to_string()),
            ..ViewQuery::default()
        };
        assert!(query.view().is_err());
    }
}
