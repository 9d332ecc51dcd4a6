//! Catalogue search.
//!
//! Matching is a case-insensitive substring test of the query against each
//! product's `searchable_text`. There is no index: every call scans the
//! catalogue linearly, which is fine for a small static list, and results
//! keep catalogue order.
//!
//! - [`SearchQuery`] - trimmed, lower-cased, non-empty query text
//! - [`search`] - the scan, producing [`SearchResult`]s with snippets
//! - [`highlight`] - literal, case-insensitive match highlighting
//! - [`SearchHistory`] - persisted recent terms
//! - [`Debouncer`] - search-as-you-type throttling

mod debounce;
mod highlight;
mod history;
mod snippet;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};
use vitrina_core::ProductId;

use crate::catalog::Product;

pub use debounce::Debouncer;
pub use highlight::{HighlightMarker, highlight};
pub use history::SearchHistory;
pub use snippet::{SNIPPET_CONTEXT_CHARS, extract_snippet};

/// A normalized, non-empty search query.
///
/// Construction trims and lower-cases the raw input. An empty query cannot
/// be represented, so "nothing to search for" is handled by the caller
/// before [`search`] is ever invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize raw user input. Returns `None` if nothing is left after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A search result item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub product_id: ProductId,
    pub title: String,
    /// Context window around the first match in the product text.
    pub snippet: String,
    pub price: Decimal,
    pub image: Option<String>,
}

/// Scan `items` for products whose searchable text contains `query`.
///
/// Results are in input order. An empty catalogue or a query that matches
/// nothing yields an empty vector.
#[instrument(skip(items), fields(catalogue = items.len()))]
pub fn search(query: &SearchQuery, items: &[Product]) -> Vec<SearchResult> {
    let term = query.as_str();

    let results: Vec<SearchResult> = items
        .iter()
        .filter_map(|product| {
            let snippet = extract_snippet(&product.searchable_text, term)?;
            Some(SearchResult {
                product_id: product.id.clone(),
                title: product.title.clone(),
                snippet,
                price: product.price,
                image: product.image.clone(),
            })
        })
        .collect();

    debug!(matches = results.len(), "Search complete");
    results
}

/// What the presentation layer should show for a submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The input was empty after trimming; prompt for a term.
    NoQuery,
    /// A valid query that matched nothing.
    NoMatches { term: String },
    /// One or more matches, in catalogue order.
    Matches {
        term: String,
        results: Vec<SearchResult>,
    },
}

impl SearchOutcome {
    /// Number of results (0 unless `Matches`).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Matches { results, .. } => results.len(),
            Self::NoQuery | Self::NoMatches { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize `raw`, run the search, and classify the outcome.
#[must_use]
pub fn run(raw: &str, items: &[Product]) -> SearchOutcome {
    let Some(query) = SearchQuery::parse(raw) else {
        return SearchOutcome::NoQuery;
    };

    let results = search(&query, items);
    let term = query.0;
    if results.is_empty() {
        SearchOutcome::NoMatches { term }
    } else {
        SearchOutcome::Matches { term, results }
    }
}
