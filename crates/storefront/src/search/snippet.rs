//! Snippet extraction around the first match.

/// Characters of context kept on each side of the match.
pub const SNIPPET_CONTEXT_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Cut a window around the first occurrence of `term` in `text`.
///
/// The window holds at most [`SNIPPET_CONTEXT_CHARS`] characters before and
/// after the match, clamped to the text. `"..."` is prepended when the window
/// starts after the beginning of the text and appended when it stops before
/// the end. Offsets count `char`s, so multi-byte text is never split.
///
/// Returns `None` if `term` does not occur in `text`.
#[must_use]
pub fn extract_snippet(text: &str, term: &str) -> Option<String> {
    let match_byte = text.find(term)?;

    let match_start = text.get(..match_byte)?.chars().count();
    let match_len = term.chars().count();
    let text_len = text.chars().count();

    let start = match_start.saturating_sub(SNIPPET_CONTEXT_CHARS);
    let end = (match_start + match_len + SNIPPET_CONTEXT_CHARS).min(text_len);

    let window: String = text.chars().skip(start).take(end - start).collect();

    let mut snippet = String::with_capacity(window.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&window);
    if end < text_len {
        snippet.push_str(ELLIPSIS);
    }
    Some(snippet)
}
