//! Caller-facing option types.
//!
//! Every `format_text` call takes its own immutable snapshot of these:
//! the passes compile the keys and terms they need up front and never
//! read the caller's data again, so a caller mutating its own option
//! struct between calls cannot tear a render in progress.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A vocabulary entry for mention highlighting: a word, or an
/// `@`-prefixed token. Matching is case-insensitive unless
/// `case_sensitive` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionKey {
    pub key: SmolStr,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl MentionKey {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self {
            key: key.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(key: impl Into<SmolStr>) -> Self {
        Self {
            key: key.into(),
            case_sensitive: true,
        }
    }
}

/// Options for one [`format_text`](crate::format_text) call.
///
/// All fields are independently optional. When both `search_matches` and
/// `search_term` are supplied, the literal `search_matches` list wins and
/// `search_term` is not parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Recognize `@token` occurrences and mark them for profile linking.
    pub at_mentions: bool,
    /// Wrap words matching a mention key in a highlight span.
    pub mention_highlight: bool,
    /// Ordered mention vocabulary; earlier keys win ties.
    pub mention_keys: Vec<MentionKey>,
    /// Raw search string, parsed into terms (flags stripped, quoted
    /// phrases kept whole, trailing `*` treated as a wildcard).
    pub search_term: Option<String>,
    /// Precomputed match literals from a search backend; bypasses
    /// `search_term` parsing entirely.
    pub search_matches: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            at_mentions: true,
            mention_highlight: true,
            mention_keys: Vec::new(),
            search_term: None,
            search_matches: Vec::new(),
        }
    }
}
