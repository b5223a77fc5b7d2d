//! Search-term highlighting.
//!
//! The last pass in the pipeline. Scans every segment, including code,
//! and the href of every link:
//!
//! - plain text and inline code spans wrap matches in place;
//! - mention markers wrap whole, search outside, mention inside;
//! - an anchor whose href matches gains a `search-highlight` class and
//!   keeps its visible text untouched (autolinks always take this
//!   route, their text being their href);
//! - a code block's text is never modified; matches render into a
//!   highlight-only overlay layered above the block, leaving the text
//!   beneath available to an independent syntax-highlighting pass.

pub mod terms;

mod matcher;

use crate::matching::MatchSpan;
use crate::segment;
use crate::tree::{CLASS_SEARCH_HIGHLIGHT, CLASS_SEARCH_OVERLAY, Document, Element, Node};
use crate::types::FormatOptions;

use matcher::TermMatcher;
use terms::SearchTerm;

pub(crate) struct SearchPass {
    matcher: TermMatcher,
}

impl SearchPass {
    /// Compile the pass from the options, or `None` when no terms
    /// resolve. A non-empty `search_matches` list takes precedence over
    /// parsing `search_term`.
    pub(crate) fn from_options(options: &FormatOptions) -> Option<Self> {
        let terms: Vec<SearchTerm> = if !options.search_matches.is_empty() {
            options
                .search_matches
                .iter()
                .map(|s| SearchTerm::literal(s))
                .collect()
        } else {
            terms::parse_search_terms(options.search_term.as_deref()?)
        };
        TermMatcher::new(&terms).map(|matcher| Self { matcher })
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
                Node::Text(text) => self.highlight_text(&text, &mut out),
                Node::Element(el) => {
                    if segment::is_mention_product(&el) {
                        out.push(self.wrap_mention_product(el));
                    } else if segment::is_anchor(&el) {
                        out.push(self.anchor(el));
                    } else if segment::is_code_block(&el) {
                        out.push(self.code_block(el));
                    } else {
                        // Inline code spans included: they wrap in place,
                        // no syntax highlighter runs over them.
                        out.push(self.rebuild_element(el).into());
                    }
                }
            }
        }
        out
    }

    fn rebuild_element(&self, mut el: Element) -> Element {
        el.children = self.rebuild(std::mem::take(&mut el.children));
        el
    }

    fn highlight_text(&self, text: &str, out: &mut Vec<Node>) {
        let spans = self.matcher.find(text);
        self.wrap_spans(text, &spans, out);
    }

    fn wrap_spans(&self, text: &str, spans: &[MatchSpan], out: &mut Vec<Node>) {
        let mut last = 0;
        for span in spans {
            if span.start > last {
                out.push(Node::text(&text[last..span.start]));
            }
            out.push(
                Element::new("span")
                    .class(CLASS_SEARCH_HIGHLIGHT)
                    .child(Node::text(&text[span.start..span.end]))
                    .into(),
            );
            last = span.end;
        }
        if last < text.len() {
            out.push(Node::text(&text[last..]));
        }
    }

    /// A mention marker or highlight is an atomic token: a term matching
    /// anywhere in its text wraps the whole thing, so the search wrapper
    /// ends up outside the mention wrappers.
    fn wrap_mention_product(&self, el: Element) -> Node {
        if self.matcher.is_match(&el.text_content()) {
            Element::new("span")
                .class(CLASS_SEARCH_HIGHLIGHT)
                .child(el.into())
                .into()
        } else {
            el.into()
        }
    }

    fn anchor(&self, mut el: Element) -> Node {
        let href_matches = el.get_attr("href").is_some_and(|href| self.matcher.is_match(href));
        if href_matches {
            el.push_class(CLASS_SEARCH_HIGHLIGHT);
            return el.into();
        }
        self.rebuild_element(el).into()
    }

    /// Code-block container: when a term matches the block's text, an
    /// overlay div with the highlighted copy becomes the code element's
    /// first child; the raw text after it stays byte-for-byte intact.
    fn code_block(&self, mut el: Element) -> Node {
        for child in &mut el.children {
            let Node::Element(code) = child else { continue };
            if code.tag.as_str() != "code" {
                continue;
            }
            let raw: Option<String> = code.children.iter().find_map(|n| match n {
                Node::Text(t) => Some(t.clone()),
                Node::Element(_) => None,
            });
            let Some(raw) = raw else { continue };
            let spans = self.matcher.find(&raw);
            if spans.is_empty() {
                continue;
            }
            let mut overlay = Element::new("div").class(CLASS_SEARCH_OVERLAY);
            self.wrap_spans(&raw, &spans, &mut overlay.children);
            code.children.insert(0, overlay.into());
        }
        el.into()
    }
}
