//! Integration tests for catalogue search.
//!
//! Runs searches through `AppState` against a catalogue loaded from disk.

#![allow(clippy::unwrap_used)]

use vitrina_integration_tests::TestShop;
use vitrina_storefront::AppState;
use vitrina_storefront::search::{
    HighlightMarker, SNIPPET_CONTEXT_CHARS, SearchOutcome, extract_snippet, highlight,
};
use vitrina_storefront::views;

fn open(shop: &TestShop) -> AppState {
    AppState::open(shop.config.clone()).unwrap()
}

fn matches(outcome: &SearchOutcome) -> Vec<&str> {
    match outcome {
        SearchOutcome::Matches { results, .. } => {
            results.iter().map(|r| r.product_id.as_str()).collect()
        }
        SearchOutcome::NoQuery | SearchOutcome::NoMatches { .. } => Vec::new(),
    }
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_search_is_case_insensitive_substring() {
    let shop = TestShop::new();
    let mut state = open(&shop);

    assert_eq!(matches(&state.run_search("PHONE")), ["p1", "p2"]);
    assert_eq!(matches(&state.run_search("silic")), ["p2"]);
}

#[test]
fn test_search_matches_derived_text() {
    let shop = TestShop::new();
    let mut state = open(&shop);

    // Tags and the formatted price are part of the searchable text
    assert_eq!(matches(&state.run_search("accessory")), ["p2"]);
    assert_eq!(matches(&state.run_search("€12.50")), ["p2"]);
}

#[test]
fn test_search_treats_metacharacters_literally() {
    let shop = TestShop::new();
    let mut state = open(&shop);

    let outcome = state.run_search("c++");
    assert_eq!(matches(&outcome), ["p3"]);

    let rendered = views::render_search(
        &outcome,
        state.config().currency,
        &HighlightMarker::new("[", "]"),
    );
    assert!(rendered.contains("[c++] primer"));
}

#[test]
fn test_blank_and_missing_terms() {
    let shop = TestShop::new();
    let mut state = open(&shop);

    assert_eq!(state.run_search("  \t"), SearchOutcome::NoQuery);
    assert_eq!(
        state.run_search("Laptop"),
        SearchOutcome::NoMatches {
            term: "laptop".to_string()
        }
    );
}

// =============================================================================
// Snippets and Highlighting
// =============================================================================

#[test]
fn test_snippet_is_bounded() {
    let text = format!("{}needle{}", "a".repeat(200), "b".repeat(200));
    let snippet = extract_snippet(&text, "needle").unwrap();

    assert!(snippet.starts_with("..."));
    assert!(snippet.ends_with("..."));
    assert_eq!(
        snippet.chars().count(),
        2 * SNIPPET_CONTEXT_CHARS + "needle".len() + 6
    );
}

#[test]
fn test_highlight_preserves_original_case() {
    let marked = highlight("Red Phone, red PHONE", "phone", &HighlightMarker::html());
    assert_eq!(
        marked,
        "Red <span class=\"highlight\">Phone</span>, red <span class=\"highlight\">PHONE</span>"
    );
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_history_survives_restart() {
    let shop = TestShop::new();
    {
        let mut state = open(&shop);
        state.run_search("phone");
        state.run_search("case");
        state.run_search("phone");
    }

    let state = open(&shop);
    assert_eq!(state.history().terms(), ["phone", "case"]);
    assert_eq!(state.history().suggestions("ph"), ["phone"]);
}
