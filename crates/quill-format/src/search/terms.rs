//! Search-string parsing.
//!
//! Mirrors how the search backend tokenizes queries: double-quoted
//! phrases are one term, `in:`/`from:`-style flags are dropped, `@name`
//! tokens keep their `@`, and everything else splits on the server's
//! separator set. A trailing `*` marks a wildcard term; an interior `*`
//! is literal.

use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

static SEARCH_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-?(?:in|from|channel|on|before|after):(.*)$").unwrap()
});

static MENTION_TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z0-9._-]+").unwrap());

/// Characters the backend splits plain query text on.
const TERM_SEPARATORS: &[char] = &['<', '>', '+', '(', ')', '~', '@'];

/// One unit of search-query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub text: SmolStr,
    /// Quoted phrase: requires the exact contiguous word sequence.
    pub is_phrase: bool,
    /// Trailing `*`: matches the literal prefix at a word start.
    pub has_wildcard: bool,
}

impl SearchTerm {
    fn word(text: &str) -> Self {
        Self {
            text: SmolStr::new(text),
            is_phrase: false,
            has_wildcard: text.ends_with('*'),
        }
    }

    fn phrase(text: &str) -> Self {
        Self {
            text: SmolStr::new(text),
            is_phrase: true,
            has_wildcard: false,
        }
    }

    /// A precomputed match literal from a search backend
    /// (`search_matches`); never a phrase or wildcard, matched verbatim.
    pub(crate) fn literal(text: &str) -> Self {
        Self {
            text: SmolStr::new(text),
            is_phrase: false,
            has_wildcard: false,
        }
    }
}

/// Parse a raw search string into match terms. Unparseable or empty
/// input yields an empty list, which downstream means "no highlighting".
pub fn parse_search_terms(input: &str) -> Vec<SearchTerm> {
    let mut terms = Vec::new();
    let mut rest = input;
    // Set when a flag like `in:` had no attached value; the next token
    // is that value, not a term.
    let mut pending_flag_value = false;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some(after_quote) = rest.strip_prefix('"') {
            let (phrase, after) = match after_quote.find('"') {
                Some(end) => (&after_quote[..end], &after_quote[end + 1..]),
                None => (after_quote, ""),
            };
            rest = after;
            if pending_flag_value {
                pending_flag_value = false;
            } else if !phrase.is_empty() {
                terms.push(SearchTerm::phrase(phrase));
            }
            continue;
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, after) = rest.split_at(end);
        rest = after;

        if pending_flag_value {
            pending_flag_value = false;
            continue;
        }
        if let Some(caps) = SEARCH_FLAG_RE.captures(token) {
            if caps.get(1).is_some_and(|v| v.as_str().is_empty()) {
                pending_flag_value = true;
            }
            continue;
        }
        if let Some(m) = MENTION_TERM_RE.find(token) {
            terms.push(SearchTerm::word(m.as_str()));
            continue;
        }
        for piece in token.split(TERM_SEPARATORS) {
            if !piece.is_empty() {
                terms.push(SearchTerm::word(piece));
            }
        }
    }

    tracing::trace!(terms = terms.len(), "parsed search input");
    terms
}
