//! Markdown rendering: message source -> [`Document`] tree.
//!
//! An event-driven builder over `pulldown_cmark`, dispatching on
//! `Start`/`End`/`Text` events. Code block content is buffered until the
//! closing fence so the block lands in the tree as one raw text leaf;
//! that leaf is the text a later syntax-highlighting pass and the search
//! overlay both address, so it must stay verbatim.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use url::Url;

use crate::tree::{
    CLASS_CODE_BLOCK, CLASS_CODE_BLOCK_WRAP, CLASS_CODE_SPAN, CLASS_HLJS, CLASS_LINK,
    CLASS_LINK_THEME, Document, Element, Node,
};

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>]+").unwrap());

/// Render message markdown into a document tree.
pub fn render_markdown(text: &str) -> Document {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH);
    let mut builder = TreeBuilder::default();
    builder.run(parser);
    builder.finish()
}

/// The anchor form every link in a message shares, autolinked or not.
pub(crate) fn message_link(href: &str, title: &str) -> Element {
    let mut el = Element::new("a")
        .class(CLASS_LINK_THEME)
        .class(CLASS_LINK)
        .attr("href", href);
    if !title.is_empty() {
        el = el.attr("title", title);
    }
    el.attr("rel", "noreferrer").attr("target", "_blank")
}

#[derive(Default)]
struct TreeBuilder {
    doc: Document,
    stack: Vec<Element>,
    /// (language, content) while inside a fenced or indented block.
    code_buffer: Option<(Option<String>, String)>,
    link_depth: usize,
}

impl TreeBuilder {
    fn finish(mut self) -> Document {
        // Unbalanced events would leave elements open; the parser never
        // produces that, but fold anything left rather than drop it.
        while let Some(el) = self.stack.pop() {
            self.push_node(el.into());
        }
        self.doc
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.doc.children.push(node),
        }
    }

    fn open(&mut self, el: Element) {
        self.stack.push(el);
    }

    fn close(&mut self) {
        if let Some(el) = self.stack.pop() {
            self.push_node(el.into());
        }
    }

    fn run<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => {
                    if let Some((_, buf)) = self.code_buffer.as_mut() {
                        buf.push_str(&text);
                    } else if self.link_depth > 0 {
                        self.push_node(Node::text(text.into_string()));
                    } else {
                        self.autolinked_text(&text);
                    }
                }
                Event::Code(text) => {
                    let code = Element::new("code").child(Node::text(text.into_string()));
                    self.push_node(Element::new("span").class(CLASS_CODE_SPAN).child(code.into()).into());
                }
                // Raw HTML in a message is displayed, not interpreted.
                Event::Html(html) | Event::InlineHtml(html) => {
                    self.push_node(Node::text(html.into_string()));
                }
                Event::SoftBreak => {
                    if let Some((_, buf)) = self.code_buffer.as_mut() {
                        buf.push('\n');
                    } else {
                        self.push_node(Node::text("\n"));
                    }
                }
                Event::HardBreak => self.push_node(Element::new("br").into()),
                Event::Rule => self.push_node(Element::new("hr").into()),
                _ => {}
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(Element::new("p")),
            Tag::Heading { level, .. } => self.open(Element::new(heading_tag(level))),
            Tag::BlockQuote(_) => self.open(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split(' ').next().unwrap_or("");
                        (!lang.is_empty()).then(|| lang.to_string())
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code_buffer = Some((lang, String::new()));
            }
            Tag::List(Some(1)) => self.open(Element::new("ol")),
            Tag::List(Some(start)) => self.open(Element::new("ol").attr("start", start.to_string())),
            Tag::List(None) => self.open(Element::new("ul")),
            Tag::Item => self.open(Element::new("li")),
            Tag::Emphasis => self.open(Element::new("em")),
            Tag::Strong => self.open(Element::new("strong")),
            Tag::Strikethrough => self.open(Element::new("del")),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = if link_type == LinkType::Email {
                    format!("mailto:{dest_url}")
                } else {
                    dest_url.into_string()
                };
                self.link_depth += 1;
                self.open(message_link(&href, &title));
            }
            // Messages link media rather than inline it: an image renders
            // as the same anchor form around its alt text.
            Tag::Image {
                dest_url, title, ..
            } => {
                self.link_depth += 1;
                self.open(message_link(&dest_url, &title));
            }
            Tag::HtmlBlock => {}
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough => self.close(),
            TagEnd::Link | TagEnd::Image => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.close();
            }
            TagEnd::CodeBlock => {
                let (lang, content) = self.code_buffer.take().unwrap_or_default();
                let mut code = Element::new("code").class(CLASS_HLJS);
                if let Some(lang) = lang {
                    code.push_class(&format!("language-{lang}"));
                }
                code.children.push(Node::Text(content));
                self.push_node(
                    Element::new("div")
                        .class(CLASS_CODE_BLOCK)
                        .class(CLASS_CODE_BLOCK_WRAP)
                        .child(code.into())
                        .into(),
                );
            }
            TagEnd::HtmlBlock => {}
            _ => {}
        }
    }

    /// Push a text run, converting bare http(s) URLs into anchors whose
    /// visible text is the href itself.
    fn autolinked_text(&mut self, text: &str) {
        let mut last = 0;
        for m in URL_RE.find_iter(text) {
            // A scheme glued to the tail of a word is not a link.
            let preceded_by_word = text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
            if preceded_by_word {
                continue;
            }
            let url = trim_url_candidate(m.as_str());
            if url.is_empty() || !is_valid_url(url) {
                continue;
            }
            if m.start() > last {
                self.push_node(Node::text(&text[last..m.start()]));
            }
            self.push_node(message_link(url, "").child(Node::text(url)).into());
            last = m.start() + url.len();
        }
        if last < text.len() {
            self.push_node(Node::text(&text[last..]));
        }
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Strip punctuation that belongs to the sentence, not the URL. A
/// closing paren stays only while a matching opener is inside the URL.
fn trim_url_candidate(mut url: &str) -> &str {
    loop {
        let Some(last) = url.chars().next_back() else {
            return url;
        };
        let trim = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' => true,
            ')' => url.matches('(').count() < url.matches(')').count(),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| url.host_str().is_some())
}
