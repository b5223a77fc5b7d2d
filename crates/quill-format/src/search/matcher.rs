//! Term compilation and matching.
//!
//! All search matching is case-insensitive. Plain and phrase terms
//! require a word boundary on both sides; wildcard terms drop the `*`
//! and the tail boundary, matching the literal prefix only: `foo*`
//! highlights the `foo` of `foobar`, and a `foo.*` query highlights the
//! `foo.` of `foo.bar`.

use regex::Regex;

use crate::matching::{self, MatchSpan};

use super::terms::SearchTerm;

pub(crate) struct TermMatcher {
    patterns: Vec<Regex>,
}

impl TermMatcher {
    /// Compile an ordered term list; `None` when nothing survives
    /// (empty input degrades to no highlighting).
    pub(crate) fn new(terms: &[SearchTerm]) -> Option<Self> {
        let patterns: Vec<Regex> = terms.iter().filter_map(term_pattern).collect();
        if patterns.is_empty() {
            None
        } else {
            Some(Self { patterns })
        }
    }

    /// Resolved match spans within one text segment.
    pub(crate) fn find(&self, text: &str) -> Vec<MatchSpan> {
        matching::scan(text, &self.patterns)
    }

    /// Whether any term matches anywhere in the given text. Used for
    /// targets wrapped or classed whole: mention markers and hrefs.
    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

fn term_pattern(term: &SearchTerm) -> Option<Regex> {
    let (body, tail_boundary) = if term.has_wildcard {
        (term.text.trim_end_matches('*'), false)
    } else {
        (term.text.as_str(), true)
    };
    if body.is_empty() {
        return None;
    }
    Some(Regex::new(&matching::word_pattern(body, true, tail_boundary)).unwrap())
}
