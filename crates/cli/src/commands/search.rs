//! Search and search history.

use vitrina_storefront::search::HighlightMarker;
use vitrina_storefront::{AppState, Result, views};

/// Run a search and render the results.
///
/// `color` picks ANSI highlighting over plain `*match*` markers.
pub fn run(state: &mut AppState, raw: &str, color: bool) -> String {
    let marker = if color {
        HighlightMarker::ansi()
    } else {
        HighlightMarker::new("*", "*")
    };

    let outcome = state.run_search(raw);
    views::render_search(&outcome, state.config().currency, &marker)
}

/// Show recent searches, or forget them when `clear` is set.
///
/// # Errors
///
/// Returns a storage error if clearing cannot be saved.
pub fn history(state: &mut AppState, clear: bool) -> Result<String> {
    if clear {
        state.history_mut().clear()?;
        return Ok("Search history cleared.".to_string());
    }
    Ok(views::render_history(state.history()))
}
