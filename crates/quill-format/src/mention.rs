//! Mention pass: at-mention marking and mention-key highlighting.
//!
//! Runs after markdown rendering and before search highlighting. Two
//! decorations compose here: every `@token` gets a marker span carrying
//! the bare name in `data-mention` (the UI layer turns these into
//! profile links), and tokens or words matching a mention key get a
//! highlight wrapper around the marker. The pass never descends into
//! code spans, code blocks or autolinked URLs, and never reads hrefs.

use std::sync::LazyLock;

use regex::Regex;

use crate::matching;
use crate::segment;
use crate::tree::{ATTR_MENTION, CLASS_MENTION_HIGHLIGHT, Document, Element, Node};
use crate::types::FormatOptions;

/// `\B` rejects a word character immediately before the `@`, so
/// `foo@bar.com` is not a mention. Trailing dots stay inside the token;
/// usernames may contain them.
static AT_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@[A-Za-z0-9._-]+").unwrap());

pub(crate) struct MentionPass {
    at_mentions: bool,
    /// Compiled key patterns in declaration order; empty when mention
    /// highlighting is disabled.
    keys: Vec<Regex>,
}

impl MentionPass {
    /// Compile the pass, or `None` when the options make it a no-op.
    pub(crate) fn from_options(options: &FormatOptions) -> Option<Self> {
        let keys = if options.mention_highlight {
            options
                .mention_keys
                .iter()
                .filter(|k| !k.key.is_empty())
                .map(|k| {
                    Regex::new(&matching::word_pattern(&k.key, !k.case_sensitive, true))
                        .unwrap()
                })
                .collect()
        } else {
            Vec::new()
        };
        if !options.at_mentions && keys.is_empty() {
            return None;
        }
        tracing::trace!(keys = keys.len(), at_mentions = options.at_mentions, "mention pass enabled");
        Some(Self {
            at_mentions: options.at_mentions,
            keys,
        })
    }

    pub(crate) fn apply(&self, doc: Document) -> Document {
        Document {
            children: self.rebuild(doc.children),
        }
    }

    fn rebuild(&self, children: Vec<Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(children.len());
        for node in children {
            match node {
                Node::Text(text) => self.text_leaf(&text, &mut out),
                Node::Element(mut el) => {
                    let flags = segment::element_flags(&el);
                    if !flags.is_code() && !flags.contains(segment::SegmentFlags::AUTOLINK) {
                        el.children = self.rebuild(std::mem::take(&mut el.children));
                    }
                    out.push(el.into());
                }
            }
        }
        out
    }

    fn text_leaf(&self, text: &str, out: &mut Vec<Node>) {
        if !self.at_mentions {
            self.highlight_words(text, out);
            return;
        }
        let mut last = 0;
        for m in AT_MENTION_RE.find_iter(text) {
            self.highlight_words(&text[last..m.start()], out);
            out.push(self.mention_marker(m.as_str()));
            last = m.end();
        }
        self.highlight_words(&text[last..], out);
    }

    /// Build the marker for one `@token`, highlight-wrapped when any key
    /// matches the token. A prefixed and a bare key matching the same
    /// token produce a single wrapper.
    fn mention_marker(&self, token: &str) -> Node {
        let name = token.strip_prefix('@').unwrap_or(token);
        let marker = Element::new("span")
            .attr(ATTR_MENTION, name)
            .child(Node::text(token));
        if self.keys.iter().any(|re| re.is_match(token)) {
            Element::new("span")
                .class(CLASS_MENTION_HIGHLIGHT)
                .child(marker.into())
                .into()
        } else {
            marker.into()
        }
    }

    /// Highlight key matches in plain (non-token) text.
    fn highlight_words(&self, text: &str, out: &mut Vec<Node>) {
        if text.is_empty() {
            return;
        }
        if self.keys.is_empty() {
            out.push(Node::text(text));
            return;
        }
        let spans = matching::scan(text, &self.keys);
        let mut last = 0;
        for span in spans {
            if span.start > last {
                out.push(Node::text(&text[last..span.start]));
            }
            out.push(
                Element::new("span")
                    .class(CLASS_MENTION_HIGHLIGHT)
                    .child(Node::text(&text[span.start..span.end]))
                    .into(),
            );
            last = span.end;
        }
        if last < text.len() {
            out.push(Node::text(&text[last..]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_mention_token_shapes() {
        assert_eq!(
            AT_MENTION_RE
                .find_iter("These are @words in a @sentence.")
                .map(|m| m.as_str())
                .collect::<Vec<_>>(),
            vec!["@words", "@sentence."]
        );
        // An @ glued to a word tail is not a mention.
        assert!(AT_MENTION_RE.find_iter("user@example.com").next().is_none());
        assert_eq!(
            AT_MENTION_RE.find("@start").map(|m| m.as_str()),
            Some("@start")
        );
    }

    #[test]
    fn no_op_options_compile_to_none() {
        let options = FormatOptions {
            at_mentions: false,
            mention_highlight: false,
            mention_keys: vec![crate::types::MentionKey::new("words")],
            ..FormatOptions::default()
        };
        assert!(MentionPass::from_options(&options).is_none());

        let options = FormatOptions {
            at_mentions: false,
            ..FormatOptions::default()
        };
        assert!(MentionPass::from_options(&options).is_none());
    }
}
