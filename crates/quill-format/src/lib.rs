//! Quill message formatting
//!
//! Renders chat message text into safe HTML and overlays two independent
//! annotation passes on top of the markdown rendering: mention
//! highlighting and search-term highlighting. The pipeline is fixed
//! (markdown render, then mentions, then search) and each stage is a
//! pure rebuild of an immutable document tree, so the whole thing is a
//! bounded, synchronous transform with no shared state, safe to call
//! from any number of threads without coordination.
//!
//! ```
//! use quill_format::{FormatOptions, MentionKey, format_text};
//!
//! let options = FormatOptions {
//!     mention_keys: vec![MentionKey::new("@words")],
//!     ..FormatOptions::default()
//! };
//! let html = format_text("These are @words", &options);
//! assert_eq!(
//!     html,
//!     "<p>These are <span class=\"mention--highlight\">\
//!      <span data-mention=\"words\">@words</span></span></p>"
//! );
//! ```

pub mod html;
pub mod render;
pub mod search;
pub mod segment;
pub mod tree;
pub mod types;

mod matching;
mod mention;

pub use search::terms::{SearchTerm, parse_search_terms};
pub use types::{FormatOptions, MentionKey};

use mention::MentionPass;
use search::SearchPass;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum FormatError {
    #[error("failed to write rendered message html")]
    #[diagnostic(code(quill_format::write))]
    Write(#[from] std::io::Error),
}

/// Format message text into HTML.
///
/// The options are read once, up front: the passes compile their own
/// key and term state, so concurrent mutation of caller-held data
/// cannot affect a render in progress. Calling this on its own output
/// is not idempotent (highlight wrappers in the input would be treated
/// as literal text) and is not a supported use.
pub fn format_text(text: &str, options: &FormatOptions) -> String {
    tracing::trace!(len = text.len(), "formatting message text");
    let mut doc = render::render_markdown(text);
    if let Some(pass) = MentionPass::from_options(options) {
        doc = pass.apply(doc);
    }
    if let Some(pass) = SearchPass::from_options(options) {
        doc = pass.apply(doc);
    }
    let mut out = String::new();
    html::push_html(&mut out, &doc);
    out.truncate(out.trim_end().len());
    out
}

/// Format message text and write the HTML to an io sink.
pub fn format_text_to<W: std::io::Write>(
    text: &str,
    options: &FormatOptions,
    writer: &mut W,
) -> Result<(), FormatError> {
    let rendered = format_text(text, options);
    writer.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_without_any_highlighting() {
        let html = format_text("These are words in a sentence.", &FormatOptions::default());
        assert_eq!(html, "<p>These are words in a sentence.</p>");
    }

    #[test]
    fn format_text_to_writes_the_same_bytes() {
        let options = FormatOptions::default();
        let mut out = Vec::new();
        format_text_to("some **bold** text", &options, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format_text("some **bold** text", &options)
        );
    }
}
