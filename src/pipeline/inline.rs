//! Inline formatting: split a line of text into styled tokens.
//!
//! Recognised markers, matched non-greedily:
//!
//! | Source          | Token                 |
//! |-----------------|-----------------------|
//! | `` `code` ``    | [`Inline::Code`]      |
//! | `**strong**`    | [`Inline::Strong`]    |
//! | `*emphasis*`    | [`Inline::Emphasis`]  |
//! | `[label](url)`  | [`Inline::Link`]      |
//!
//! One combined regex is scanned left to right, so the earliest marker wins
//! and, at the same position, code beats strong beats emphasis. Code span
//! content is final. Strong, emphasis and link labels are scanned again for
//! inner markers. Overlapping markers (`*a **b* c**`) are not balanced and
//! come out however the leftmost match falls.

use once_cell::sync::Lazy;
use regex::Regex;

/// A styled run of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    Link { label: Vec<Inline>, url: String },
}

static RE_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"`(?P<code>[^`]+)`|\*\*(?P<strong>.+?)\*\*|\*(?P<em>.+?)\*|\[(?P<label>.+?)\]\((?P<url>.+?)\)",
    )
    .unwrap()
});

/// Tokenize one line of non-code text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in RE_INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        last = whole.end();

        let token = if let Some(code) = caps.name("code") {
            Inline::Code(code.as_str().to_string())
        } else if let Some(strong) = caps.name("strong") {
            Inline::Strong(parse_inline(strong.as_str()))
        } else if let Some(em) = caps.name("em") {
            Inline::Emphasis(parse_inline(em.as_str()))
        } else if let (Some(label), Some(url)) = (caps.name("label"), caps.name("url")) {
            Inline::Link {
                label: parse_inline(label.as_str()),
                url: url.as_str().to_string(),
            }
        } else {
            Inline::Text(whole.as_str().to_string())
        };
        out.push(token);
    }

    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
    out
}

/// Concatenate the visible text of a token list, dropping all styling.
pub fn plain_text(tokens: &[Inline]) -> String {
    let mut s = String::new();
    collect_plain(tokens, &mut s);
    s
}

fn collect_plain(tokens: &[Inline], out: &mut String) {
    for token in tokens {
        match token {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Strong(inner) | Inline::Emphasis(inner) => collect_plain(inner, out),
            Inline::Link { label, .. } => collect_plain(label, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(parse_inline("just words"), vec![text("just words")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            parse_inline("Some **bold** and *italic* text."),
            vec![
                text("Some "),
                Inline::Strong(vec![text("bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("italic")]),
                text(" text."),
            ]
        );
    }

    #[test]
    fn test_code_span_content_is_not_formatted() {
        assert_eq!(
            parse_inline("run `a*b*c` now"),
            vec![text("run "), Inline::Code("a*b*c".into()), text(" now")]
        );
    }

    #[test]
    fn test_link_with_formatted_label() {
        assert_eq!(
            parse_inline("see [the **docs**](https://docs.rs)"),
            vec![
                text("see "),
                Inline::Link {
                    label: vec![text("the "), Inline::Strong(vec![text("docs")])],
                    url: "https://docs.rs".into(),
                },
            ]
        );
    }

    #[test]
    fn test_non_greedy_matching() {
        assert_eq!(
            parse_inline("**a** b **c**"),
            vec![
                Inline::Strong(vec![text("a")]),
                text(" b "),
                Inline::Strong(vec![text("c")]),
            ]
        );
    }

    #[test]
    fn test_emphasis_inside_strong() {
        assert_eq!(
            parse_inline("**very *much* so**"),
            vec![Inline::Strong(vec![
                text("very "),
                Inline::Emphasis(vec![text("much")]),
                text(" so"),
            ])]
        );
    }

    #[test]
    fn test_unbalanced_markers_stay_literal() {
        assert_eq!(parse_inline("2 * 3"), vec![text("2 * 3")]);
        assert_eq!(parse_inline("a `tick"), vec![text("a `tick")]);
    }

    #[test]
    fn test_plain_text_of_tokens() {
        let tokens = parse_inline("A **b** `c` [d](e)");
        assert_eq!(plain_text(&tokens), "A b c d");
    }
}
