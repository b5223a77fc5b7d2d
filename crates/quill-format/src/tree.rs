//! The rendered-message tree.
//!
//! A formatted message is a tree of element nodes and text leaves. The
//! mention and search passes are pure tree-to-tree rebuilds over this
//! structure; serialization to an HTML string happens once, at the end.
//! Working on a tree instead of splicing wrapper markup into a string
//! keeps every match inside a single text leaf, so offsets never shift
//! under a pass's feet.

use smol_str::SmolStr;

/// Class and attribute vocabulary shared by the renderer, the segmenter
/// and both highlighting passes. These names are a wire format: the
/// consuming UI layer selects on them.
pub const CLASS_MENTION_HIGHLIGHT: &str = "mention--highlight";
pub const CLASS_SEARCH_HIGHLIGHT: &str = "search-highlight";
pub const CLASS_CODE_SPAN: &str = "codespan__pre-wrap";
pub const CLASS_CODE_BLOCK: &str = "post-code";
pub const CLASS_CODE_BLOCK_WRAP: &str = "post-code--wrap";
pub const CLASS_SEARCH_OVERLAY: &str = "post-code__search-highlighting";
pub const CLASS_LINK_THEME: &str = "theme";
pub const CLASS_LINK: &str = "markdown__link";
pub const CLASS_HLJS: &str = "hljs";
pub const ATTR_MENTION: &str = "data-mention";

/// A fully rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element. Classes are kept separate from the other attributes
/// because the search pass appends to an anchor's class list in place,
/// and because serialization writes `class` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: SmolStr,
    pub classes: Vec<SmolStr>,
    pub attrs: Vec<(SmolStr, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: SmolStr::new(tag),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(SmolStr::new(class));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((SmolStr::new(name), value.into()));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn push_class(&mut self, class: &str) {
        self.classes.push(SmolStr::new(class));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.as_str() == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of every leaf under this element, in document
    /// order. Used to test an element's displayed text as a whole, e.g.
    /// matching search terms against a mention marker or detecting an
    /// autolink (visible text equal to the href).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(children: &[Node], out: &mut String) {
    for node in children {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_flattens_nested_children() {
        let el = Element::new("p")
            .child(Node::text("These are "))
            .child(
                Element::new("strong")
                    .child(Node::text("words"))
                    .into(),
            )
            .child(Node::text("."));

        assert_eq!(el.text_content(), "These are words.");
    }

    #[test]
    fn class_and_attr_lookup() {
        let el = Element::new("a")
            .class(CLASS_LINK_THEME)
            .class(CLASS_LINK)
            .attr("href", "https://example.com");

        assert!(el.has_class("markdown__link"));
        assert!(!el.has_class("search-highlight"));
        assert_eq!(el.get_attr("href"), Some("https://example.com"));
        assert_eq!(el.get_attr("rel"), None);
    }
}
