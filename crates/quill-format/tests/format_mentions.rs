//! Behavioral contract of the mention pass: at-mention marking,
//! mention-key highlighting, and how both interact with markdown
//! structure.

use quill_format::{FormatOptions, MentionKey, format_text};

fn format_with_keys(input: &str, keys: Vec<MentionKey>) -> String {
    format_text(
        input,
        &FormatOptions {
            mention_keys: keys,
            ..FormatOptions::default()
        },
    )
}

#[test]
fn no_mentions() {
    assert_eq!(
        format_with_keys("These are words", vec![]),
        "<p>These are words</p>"
    );
}

#[test]
fn plain_word_key_highlights_without_a_marker() {
    assert_eq!(
        format_with_keys("These are words", vec![MentionKey::new("words")]),
        "<p>These are <span class=\"mention--highlight\">words</span></p>"
    );
}

#[test]
fn at_mention_is_marked_even_without_a_matching_key() {
    assert_eq!(
        format_with_keys("This is @user", vec![MentionKey::new("@words")]),
        "<p>This is <span data-mention=\"user\">@user</span></p>"
    );
}

#[test]
fn at_mention_with_matching_key_nests_marker_inside_highlight() {
    assert_eq!(
        format_with_keys("These are @words", vec![MentionKey::new("@words")]),
        "<p>These are <span class=\"mention--highlight\"><span data-mention=\"words\">@words</span></span></p>"
    );
}

#[test]
fn prefixed_and_bare_key_for_the_same_word_wrap_once() {
    assert_eq!(
        format_with_keys(
            "These are @words",
            vec![MentionKey::new("@words"), MentionKey::new("words")],
        ),
        "<p>These are <span class=\"mention--highlight\"><span data-mention=\"words\">@words</span></span></p>"
    );
}

#[test]
fn matching_is_case_insensitive_by_default() {
    assert_eq!(
        format_with_keys(
            "These are words and Words and wORDS",
            vec![MentionKey::new("words")],
        ),
        "<p>These are <span class=\"mention--highlight\">words</span> and \
         <span class=\"mention--highlight\">Words</span> and \
         <span class=\"mention--highlight\">wORDS</span></p>"
    );
}

#[test]
fn case_sensitive_key_matches_exact_case_only() {
    assert_eq!(
        format_with_keys(
            "These are words and Words and wORDS",
            vec![MentionKey::case_sensitive("Words")],
        ),
        "<p>These are words and <span class=\"mention--highlight\">Words</span> and wORDS</p>"
    );
}

#[test]
fn at_mentions_disabled_bare_key_leaves_the_at_sign_outside() {
    let options = FormatOptions {
        at_mentions: false,
        mention_keys: vec![MentionKey::new("words")],
        ..FormatOptions::default()
    };
    assert_eq!(
        format_text("These are @words", &options),
        "<p>These are @<span class=\"mention--highlight\">words</span></p>"
    );
}

#[test]
fn at_mentions_disabled_prefixed_key_highlights_the_literal_token() {
    let options = FormatOptions {
        at_mentions: false,
        mention_keys: vec![MentionKey::new("@words")],
        ..FormatOptions::default()
    };
    assert_eq!(
        format_text("These are @words", &options),
        "<p>These are <span class=\"mention--highlight\">@words</span></p>"
    );
}

#[test]
fn mention_highlight_disabled_suppresses_wrapping() {
    let options = FormatOptions {
        mention_highlight: false,
        mention_keys: vec![MentionKey::new("words")],
        ..FormatOptions::default()
    };
    assert_eq!(
        format_text("These are words", &options),
        "<p>These are words</p>"
    );
}

#[test]
fn both_mention_features_disabled_render_plain_markdown() {
    let options = FormatOptions {
        at_mentions: false,
        mention_highlight: false,
        mention_keys: vec![MentionKey::new("@words")],
        ..FormatOptions::default()
    };
    assert_eq!(
        format_text("These are @words", &options),
        "<p>These are @words</p>"
    );
}

#[test]
fn highlight_inside_bold() {
    assert_eq!(
        format_with_keys(
            "These are **words** in a sentence",
            vec![MentionKey::new("words")],
        ),
        "<p>These are <strong><span class=\"mention--highlight\">words</span></strong> in a sentence</p>"
    );
}

#[test]
fn highlight_inside_italics() {
    assert_eq!(
        format_with_keys(
            "These _are words in_ a sentence",
            vec![MentionKey::new("words")],
        ),
        "<p>These <em>are <span class=\"mention--highlight\">words</span> in</em> a sentence</p>"
    );
}

#[test]
fn code_spans_are_never_entered() {
    assert_eq!(
        format_with_keys("These are `words`", vec![MentionKey::new("words")]),
        "<p>These are <span class=\"codespan__pre-wrap\"><code>words</code></span></p>"
    );
}

#[test]
fn code_blocks_are_never_entered() {
    assert_eq!(
        format_with_keys("```\nThese are\nwords\n```", vec![MentionKey::new("words")]),
        "<div class=\"post-code post-code--wrap\"><code class=\"hljs\">These are\nwords\n</code></div>"
    );
}

#[test]
fn link_text_is_scanned() {
    assert_eq!(
        format_with_keys(
            "These are [words words](https://example.com)",
            vec![MentionKey::new("words")],
        ),
        "<p>These are <a class=\"theme markdown__link\" href=\"https://example.com\" rel=\"noreferrer\" target=\"_blank\">\
         <span class=\"mention--highlight\">words</span> <span class=\"mention--highlight\">words</span></a></p>"
    );
}

#[test]
fn link_urls_are_never_scanned() {
    let keys = vec![
        MentionKey::new("example"),
        MentionKey::new("com"),
        MentionKey::new("https"),
        MentionKey::new("words"),
    ];
    assert_eq!(
        format_with_keys("This is [a link](https://example.com/words)", keys),
        "<p>This is <a class=\"theme markdown__link\" href=\"https://example.com/words\" rel=\"noreferrer\" target=\"_blank\">a link</a></p>"
    );
}

#[test]
fn autolinked_urls_are_never_scanned() {
    let keys = vec![
        MentionKey::new("example"),
        MentionKey::new("com"),
        MentionKey::new("https"),
        MentionKey::new("words"),
    ];
    assert_eq!(
        format_with_keys("https://example.com/words", keys),
        "<p><a class=\"theme markdown__link\" href=\"https://example.com/words\" rel=\"noreferrer\" target=\"_blank\">https://example.com/words</a></p>"
    );
}

#[test]
fn mention_token_keeps_trailing_username_punctuation() {
    assert_eq!(
        format_with_keys("ping @sentence.", vec![]),
        "<p>ping <span data-mention=\"sentence.\">@sentence.</span></p>"
    );
}
