//! Recent search terms, persisted under their own key.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::{KeyValueStore, SEARCH_HISTORY_KEY, StorageError};

/// Default number of terms kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Most-recent-first list of distinct search terms.
///
/// Recording a term that is already present moves it to the front instead
/// of adding a second entry. The list never grows past its limit; the
/// oldest terms fall off the end.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
    terms: Vec<String>,
}

impl std::fmt::Debug for SearchHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistory")
            .field("limit", &self.limit)
            .field("terms", &self.terms)
            .finish_non_exhaustive()
    }
}

impl SearchHistory {
    /// Load the saved history, starting empty if it is missing or unreadable.
    ///
    /// A `limit` of 0 is treated as 1.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let limit = limit.max(1);

        let mut terms = match store.get(SEARCH_HISTORY_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable search history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Search history unavailable");
                Vec::new()
            }
        };

        // Older snapshots may hold blanks, repeats or more than `limit` terms
        let mut seen = std::collections::HashSet::new();
        terms.retain(|t| !t.trim().is_empty() && seen.insert(t.clone()));
        terms.truncate(limit);

        Self {
            store,
            limit,
            terms,
        }
    }

    /// Terms, most recent first.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Move `term` to the front, persisting the new list.
    ///
    /// Blank terms are ignored. The in-memory list is only updated once the
    /// write succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn record(&mut self, term: &str) -> Result<(), StorageError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let mut next = Vec::with_capacity(self.limit);
        next.push(term.to_string());
        next.extend(self.terms.iter().filter(|t| *t != term).cloned());
        next.truncate(self.limit);

        self.save(&next)?;
        self.terms = next;
        debug!(term, "Recorded search term");
        Ok(())
    }

    /// Remove every term.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.save(&[])?;
        self.terms.clear();
        Ok(())
    }

    /// Recent terms starting with `prefix` (case-insensitive), most recent first.
    ///
    /// An empty prefix returns every term.
    #[must_use]
    pub fn suggestions(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        self.terms
            .iter()
            .filter(|t| t.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    fn save(&self, terms: &[String]) -> Result<(), StorageError> {
        let json = serde_json::to_string(terms)?;
        self.store.set(SEARCH_HISTORY_KEY, &json)
    }
}
