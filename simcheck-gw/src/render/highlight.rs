//! Matched-sentence highlighting
//!
//! Escapes the original text, then wraps every occurrence of each distinct
//! matched sentence in a highlight span.

use simcheck_common::report::MatchDetail;
use std::collections::HashSet;

/// Escape the two characters that would otherwise open markup.
///
/// `&` is intentionally left alone. A markup renderer that escapes `&`
/// itself would double-escape the entity text this function emits; see
/// test_ampersand_passes_through_unescaped.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Highlight every occurrence of each distinct `user_sentence` in the
/// (escaped) original text.
///
/// Duplicate sentences across details are collapsed, first-seen order
/// preserved. Replacement is literal substring, global. When one sentence
/// contains or overlaps another, the sentence processed later wins for the
/// characters it covers; that ordering is an artifact of iteration, not a
/// contract.
pub fn highlight_matches(original_text: &str, details: &[MatchDetail]) -> String {
    let mut html = escape_markup(original_text);

    let mut seen = HashSet::new();
    for detail in details {
        if !seen.insert(detail.user_sentence.as_str()) {
            continue;
        }

        let sentence = escape_markup(&detail.user_sentence);
        if sentence.is_empty() {
            continue;
        }

        let wrapped = format!("<span class=\"plagiarized\">{sentence}</span>");
        html = html.replace(&sentence, &wrapped);
    }

    html
}
