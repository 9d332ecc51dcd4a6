//! Literal, case-insensitive highlighting of query matches.

use regex::{Captures, RegexBuilder};

/// The pair of strings wrapped around each highlighted match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl HighlightMarker {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// `<span class="highlight">…</span>`, for HTML views.
    #[must_use]
    pub fn html() -> Self {
        Self::new("<span class=\"highlight\">", "</span>")
    }

    /// Bold yellow ANSI escape, for terminals.
    #[must_use]
    pub fn ansi() -> Self {
        Self::new("\x1b[1;33m", "\x1b[0m")
    }
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self::html()
    }
}

/// Wrap every case-insensitive occurrence of `term` in `text` with `marker`.
///
/// `term` is literal text: regex metacharacters are escaped before the
/// pattern is built. The original casing of each match is preserved. An
/// empty term, or a pattern the regex engine refuses, returns `text`
/// unchanged.
#[must_use]
pub fn highlight(text: &str, term: &str, marker: &HighlightMarker) -> String {
    if term.is_empty() {
        return text.to_string();
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };

    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = caps.get(0).map_or("", |m| m.as_str());
            format!("{}{}{}", marker.open, matched, marker.close)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brackets() -> HighlightMarker {
        HighlightMarker::new("[", "]")
    }

    #[test]
    fn test_highlights_every_occurrence_preserving_case() {
        assert_eq!(
            highlight("Phone case for PHONE", "phone", &brackets()),
            "[Phone] case for [PHONE]"
        );
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert_eq!(highlight("a+b and aab", "a+b", &brackets()), "[a+b] and aab");
        assert_eq!(highlight("a.b axb", "a.b", &brackets()), "[a.b] axb");
        assert_eq!(highlight("(x) x", "(x)", &brackets()), "[(x)] x");
    }

    #[test]
    fn test_dollar_in_marker_is_not_a_group_reference() {
        let marker = HighlightMarker::new("$1<", ">$0");
        assert_eq!(highlight("red phone", "phone", &marker), "red $1<phone>$0");
    }

    #[test]
    fn test_no_match_returns_text() {
        assert_eq!(highlight("red phone", "tablet", &brackets()), "red phone");
    }

    #[test]
    fn test_empty_term_returns_text() {
        assert_eq!(highlight("red phone", "", &brackets()), "red phone");
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(highlight("TELÉFONO", "teléfono", &brackets()), "[TELÉFONO]");
    }

    #[test]
    fn test_html_marker() {
        assert_eq!(
            highlight("Red Phone", "phone", &HighlightMarker::html()),
            "Red <span class=\"highlight\">Phone</span>"
        );
    }
}
