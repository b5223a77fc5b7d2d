//! Match spans and the pattern shape shared by both highlighting passes.
//!
//! Every key and term compiles to a regex of the form
//! `(^|\W)(literal)\b`: group 1 anchors the match at a word start
//! without consuming part of the wrapped text, group 2 is the span that
//! gets wrapped. The trailing `\b` is dropped when the literal ends in a
//! non-word character (`@sentence.`, CJK punctuation), where a word
//! boundary can never follow.

use regex::Regex;

/// A resolved match: a byte range within one text leaf, tagged with the
/// declaration index of the key or term that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub term: usize,
}

/// Build the match pattern for a literal key or term.
pub(crate) fn word_pattern(literal: &str, case_insensitive: bool, tail_boundary: bool) -> String {
    let mut pattern = String::new();
    if case_insensitive {
        pattern.push_str("(?i)");
    }
    pattern.push_str("(^|\\W)(");
    pattern.push_str(&regex::escape(literal));
    pattern.push(')');
    let ends_in_word = literal
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    if tail_boundary && ends_in_word {
        pattern.push_str("\\b");
    }
    pattern
}

/// Run an ordered pattern list over one segment and resolve overlaps:
/// earliest start wins, then the longest span, then declaration order.
pub(crate) fn scan(text: &str, patterns: &[Regex]) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    for (term, re) in patterns.iter().enumerate() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(2) {
                if !m.is_empty() {
                    spans.push(MatchSpan {
                        start: m.start(),
                        end: m.end(),
                        term,
                    });
                }
            }
        }
    }
    resolve_overlaps(spans)
}

pub(crate) fn resolve_overlaps(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.term.cmp(&b.term))
    });
    let mut out: Vec<MatchSpan> = Vec::new();
    for span in spans {
        if out.last().is_none_or(|prev| span.start >= prev.end) {
            out.push(span);
        }
    }
    out
}
