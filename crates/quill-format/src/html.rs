//! Serialization of a [`Document`] tree to HTML.
//!
//! Text leaves are escaped with `escape_html_body_text`, hrefs with
//! `escape_href`, attribute values with `escape_html`. The tree itself
//! carries raw text, so this is the only place escaping happens.

use pulldown_cmark_escape::{
    FmtWriter, IoWriter, StrWrite, escape_href, escape_html, escape_html_body_text,
};

use crate::tree::{CLASS_CODE_BLOCK, Document, Element, Node};

struct HtmlSerializer<W> {
    writer: W,
}

impl<W: StrWrite> HtmlSerializer<W> {
    fn write_doc(&mut self, doc: &Document) -> Result<(), W::Error> {
        self.write_children(&doc.children)
    }

    fn write_children(&mut self, children: &[Node]) -> Result<(), W::Error> {
        for node in children {
            match node {
                Node::Text(text) => escape_html_body_text(&mut self.writer, text)?,
                Node::Element(el) => self.write_element(el)?,
            }
        }
        Ok(())
    }

    fn write_element(&mut self, el: &Element) -> Result<(), W::Error> {
        self.writer.write_str("<")?;
        self.writer.write_str(&el.tag)?;
        if !el.classes.is_empty() {
            self.writer.write_str(" class=\"")?;
            for (i, class) in el.classes.iter().enumerate() {
                if i > 0 {
                    self.writer.write_str(" ")?;
                }
                escape_html(&mut self.writer, class)?;
            }
            self.writer.write_str("\"")?;
        }
        for (name, value) in &el.attrs {
            self.writer.write_str(" ")?;
            self.writer.write_str(name)?;
            self.writer.write_str("=\"")?;
            if name.as_str() == "href" {
                escape_href(&mut self.writer, value)?;
            } else {
                escape_html(&mut self.writer, value)?;
            }
            self.writer.write_str("\"")?;
        }
        if is_void(&el.tag) {
            self.writer.write_str(" />")?;
        } else {
            self.writer.write_str(">")?;
            if newline_after_open(&el.tag) {
                self.writer.write_str("\n")?;
            }
            self.write_children(&el.children)?;
            self.writer.write_str("</")?;
            self.writer.write_str(&el.tag)?;
            self.writer.write_str(">")?;
        }
        if newline_after_close(el) {
            self.writer.write_str("\n")?;
        }
        Ok(())
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr")
}

fn newline_after_open(tag: &str) -> bool {
    matches!(tag, "blockquote" | "ul" | "ol")
}

fn newline_after_close(el: &Element) -> bool {
    match el.tag.as_str() {
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "ul" | "ol" | "li"
        | "br" | "hr" => true,
        // The code-block container is a block; the search overlay div
        // inside it sits flush against the code text and is not.
        "div" => el.has_class(CLASS_CODE_BLOCK),
        _ => false,
    }
}

/// Serialize a document and push the HTML onto a `String`.
pub fn push_html(out: &mut String, doc: &Document) {
    write_html_fmt(out, doc).unwrap()
}

/// Serialize a document into a Unicode-accepting buffer or stream.
pub fn write_html_fmt<W: core::fmt::Write>(writer: W, doc: &Document) -> core::fmt::Result {
    HtmlSerializer {
        writer: FmtWriter(writer),
    }
    .write_doc(doc)
}

/// Serialize a document out to an I/O stream.
///
/// **Note**: wrap unbuffered writers like files or sockets in a
/// `BufWriter` to avoid unnecessary slowdowns.
pub fn write_html_io<W: std::io::Write>(writer: W, doc: &Document) -> std::io::Result<()> {
    HtmlSerializer {
        writer: IoWriter(writer),
    }
    .write_doc(doc)
}
