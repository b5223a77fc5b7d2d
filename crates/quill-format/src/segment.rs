//! Text-segment classification.
//!
//! A segment is a maximal run of literal display text (or a link href
//! value) within a rendered document, the unit the highlighting passes
//! scan. Because segments are tree leaves, a match can never straddle a
//! tag boundary or a code/non-code boundary; the segmenter classifies,
//! it never has to repair.

use bitflags::bitflags;

use crate::tree::{
    ATTR_MENTION, CLASS_CODE_BLOCK, CLASS_CODE_SPAN, CLASS_MENTION_HIGHLIGHT, Document, Element,
    Node,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SegmentFlags: u8 {
        /// Inside an inline backtick code span.
        const CODE_SPAN = 1 << 0;
        /// Inside a fenced or indented code block.
        const CODE_BLOCK = 1 << 1;
        /// Visible text of an anchor.
        const LINK_TEXT = 1 << 2;
        /// Anchor whose visible text equals its href.
        const AUTOLINK = 1 << 3;
        /// The href attribute value of an anchor, not display text.
        const HREF = 1 << 4;
    }
}

impl SegmentFlags {
    pub fn is_code(self) -> bool {
        self.intersects(Self::CODE_SPAN | Self::CODE_BLOCK)
    }
}

/// One addressable run of text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub flags: SegmentFlags,
}

/// Collect every segment of a document in order: each text leaf, plus
/// the href value of every anchor.
pub fn collect_segments(doc: &Document) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    walk(&doc.children, SegmentFlags::empty(), &mut out);
    out
}

fn walk<'a>(children: &'a [Node], flags: SegmentFlags, out: &mut Vec<Segment<'a>>) {
    for node in children {
        match node {
            Node::Text(text) => out.push(Segment { text, flags }),
            Node::Element(el) => {
                if let Some(href) = el.get_attr("href") {
                    out.push(Segment {
                        text: href,
                        flags: flags | SegmentFlags::HREF,
                    });
                }
                walk(&el.children, flags | element_flags(el), out);
            }
        }
    }
}

/// Flags an element contributes to the segments beneath it.
pub(crate) fn element_flags(el: &Element) -> SegmentFlags {
    let mut flags = SegmentFlags::empty();
    if is_code_span(el) {
        flags |= SegmentFlags::CODE_SPAN;
    }
    if is_code_block(el) {
        flags |= SegmentFlags::CODE_BLOCK;
    }
    if is_anchor(el) {
        flags |= SegmentFlags::LINK_TEXT;
        if is_autolink(el) {
            flags |= SegmentFlags::AUTOLINK;
        }
    }
    flags
}

pub(crate) fn is_code_span(el: &Element) -> bool {
    el.tag.as_str() == "span" && el.has_class(CLASS_CODE_SPAN)
}

pub(crate) fn is_code_block(el: &Element) -> bool {
    el.tag.as_str() == "div" && el.has_class(CLASS_CODE_BLOCK)
}

pub(crate) fn is_anchor(el: &Element) -> bool {
    el.tag.as_str() == "a"
}

/// An autolinked URL displays its own href. Later passes treat it as an
/// atomic token: mentions skip it, search matches route to the anchor
/// class instead of wrapping sub-spans of the URL text.
pub(crate) fn is_autolink(el: &Element) -> bool {
    is_anchor(el)
        && el
            .get_attr("href")
            .is_some_and(|href| href == el.text_content())
}

/// A marker produced by the mention pass (either wrapper). The search
/// pass wraps these whole rather than descending into them.
pub(crate) fn is_mention_product(el: &Element) -> bool {
    el.has_class(CLASS_MENTION_HIGHLIGHT) || el.get_attr(ATTR_MENTION).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_markdown;

    #[test]
    fn classifies_code_and_link_segments() {
        let doc = render_markdown(
            "Some `inline` and [text](https://example.com)\n\n```\nblock\n```",
        );
        let segments = collect_segments(&doc);

        let inline = segments
            .iter()
            .find(|s| s.text == "inline")
            .expect("inline code segment");
        assert!(inline.flags.contains(SegmentFlags::CODE_SPAN));
        assert!(inline.flags.is_code());

        let block = segments
            .iter()
            .find(|s| s.text == "block\n")
            .expect("code block segment");
        assert!(block.flags.contains(SegmentFlags::CODE_BLOCK));

        let href = segments
            .iter()
            .find(|s| s.flags.contains(SegmentFlags::HREF))
            .expect("href segment");
        assert_eq!(href.text, "https://example.com");

        let link_text = segments
            .iter()
            .find(|s| s.text == "text")
            .expect("link text segment");
        assert!(link_text.flags.contains(SegmentFlags::LINK_TEXT));
        assert!(!link_text.flags.contains(SegmentFlags::AUTOLINK));
    }

    #[test]
    fn autolink_text_is_flagged() {
        let doc = render_markdown("https://example.com/words");
        let segments = collect_segments(&doc);

        let url_text = segments
            .iter()
            .find(|s| s.text == "https://example.com/words" && !s.flags.contains(SegmentFlags::HREF))
            .expect("autolink text segment");
        assert!(url_text.flags.contains(SegmentFlags::AUTOLINK));
    }

    #[test]
    fn segments_cover_plain_text_in_order() {
        let doc = render_markdown("one **two** three");
        let segments = collect_segments(&doc);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["one ", "two", " three"]);
    }
}
