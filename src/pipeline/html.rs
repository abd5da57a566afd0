//! HTML document builder.
//!
//! Serialises a block sequence into one standalone HTML string with an
//! embedded print stylesheet. Turning the page into a PDF is left to a
//! browser's print dialog or a headless HTML-to-PDF renderer.
//!
//! Every piece of prose passes through [`escape_html`] exactly once, and the
//! escaper leaves existing character references alone, so feeding
//! already-escaped text back in never produces `&amp;amp;`. Code is shown as
//! typed: [`escape_code`] escapes every `&`, `<` and `>`.

use super::blocks::{Block, List};
use super::classify::split_cells;
use super::inline::{parse_inline, Inline};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Print-oriented stylesheet embedded in every document.
pub const PRINT_STYLESHEET: &str = r#"
body {
    font-family: 'Arial', sans-serif;
    line-height: 1.6;
    max-width: 900px;
    margin: 0 auto;
    padding: 20px;
    color: #333;
}
h1 {
    color: #1a1a1a;
    border-bottom: 3px solid #4CAF50;
    padding-bottom: 10px;
    margin-top: 30px;
}
h2 {
    color: #2a2a2a;
    border-bottom: 2px solid #ddd;
    padding-bottom: 8px;
    margin-top: 25px;
}
h3 { color: #3a3a3a; margin-top: 20px; }
h4 { color: #4a4a4a; margin-top: 15px; }
code {
    background-color: #f4f4f4;
    padding: 2px 6px;
    border-radius: 3px;
    font-family: 'Courier New', monospace;
    font-size: 0.9em;
}
pre {
    background-color: #f4f4f4;
    border: 1px solid #ddd;
    border-left: 3px solid #4CAF50;
    padding: 10px;
    overflow-x: auto;
    border-radius: 3px;
}
pre code { background-color: transparent; padding: 0; }
table { border-collapse: collapse; width: 100%; margin: 15px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #4CAF50; color: white; }
tr:nth-child(even) { background-color: #f9f9f9; }
ul, ol { margin: 10px 0; }
li { margin: 5px 0; }
.page-break { page-break-after: always; }
@media print {
    body { max-width: 100%; }
    h1, h2, h3 { page-break-after: avoid; }
    pre { page-break-inside: avoid; }
}
"#;

// ── Escaping ─────────────────────────────────────────────────────────────────

static RE_CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});").unwrap()
});

/// Escape `&`, `<` and `>` for HTML text content.
///
/// An `&` that already starts a character reference is kept as is.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Like [`escape_html`], additionally escaping `"` for attribute values.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    escape(text, true)
}

/// Escape every `&`, `<` and `>` for code content, which is shown as typed.
pub fn escape_code(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn escape(text: &str, quotes: bool) -> Cow<'_, str> {
    let needs_work = text
        .char_indices()
        .any(|(i, c)| needs_escape(text, i, c, quotes));
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for (i, c) in text.char_indices() {
        if !needs_escape(text, i, c, quotes) {
            out.push(c);
            continue;
        }
        out.push_str(match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            _ => "&quot;",
        });
    }
    Cow::Owned(out)
}

fn needs_escape(text: &str, at: usize, c: char, quotes: bool) -> bool {
    match c {
        '&' => !RE_CHAR_REF.is_match(&text[at..]),
        '<' | '>' => true,
        '"' => quotes,
        _ => false,
    }
}

// ── Inline rendering ─────────────────────────────────────────────────────────

/// Parse and render one line of inline Markdown as HTML.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    push_inline(&parse_inline(text), &mut out);
    out
}

fn push_inline(tokens: &[Inline], out: &mut String) {
    for token in tokens {
        match token {
            Inline::Text(t) => out.push_str(&escape_html(t)),
            Inline::Code(t) => {
                out.push_str("<code>");
                out.push_str(&escape_code(t));
                out.push_str("</code>");
            }
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                push_inline(inner, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(inner) => {
                out.push_str("<em>");
                push_inline(inner, out);
                out.push_str("</em>");
            }
            Inline::Link { label, url } => {
                out.push_str("<a href=\"");
                out.push_str(&escape_attr(url));
                out.push_str("\">");
                push_inline(label, out);
                out.push_str("</a>");
            }
        }
    }
}

// ── Blocks ───────────────────────────────────────────────────────────────────

/// Render a single block.
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => format!("<h{level}>{}</h{level}>", render_inline(text)),
        Block::Paragraph(text) => format!("<p>{}</p>", render_inline(text)),
        Block::List(list) => render_list(list),
        Block::Table(rows) => render_table(rows),
        Block::CodeBlock(lines) => {
            let body: Vec<Cow<'_, str>> = lines.iter().map(|l| escape_code(l)).collect();
            format!("<pre><code>{}</code></pre>", body.join("\n"))
        }
        Block::HorizontalRule => "<hr>".to_string(),
        Block::Blank => "<p></p>".to_string(),
    }
}

fn render_list(list: &List) -> String {
    let open = match list.start() {
        Some(n) if n != 1 => format!("<ol start=\"{n}\">"),
        Some(_) => "<ol>".to_string(),
        None => "<ul>".to_string(),
    };
    let mut parts = vec![open];
    parts.extend(
        list.items
            .iter()
            .map(|item| format!("<li>{}</li>", render_inline(&item.text))),
    );
    parts.push(if list.ordered { "</ol>" } else { "</ul>" }.to_string());
    parts.join("\n")
}

/// Render buffered table rows: header, skipped separator, body.
fn render_table(rows: &[String]) -> String {
    let mut parts = vec!["<table>".to_string()];

    if let Some(header) = rows.first() {
        let cells: String = split_cells(header)
            .into_iter()
            .map(|c| format!("<th>{}</th>", render_inline(c)))
            .collect();
        parts.push(format!("<thead><tr>{cells}</tr></thead>"));
    }

    if rows.len() > 2 {
        parts.push("<tbody>".to_string());
        for row in &rows[2..] {
            let cells: String = split_cells(row)
                .into_iter()
                .map(|c| format!("<td>{}</td>", render_inline(c)))
                .collect();
            parts.push(format!("<tr>{cells}</tr>"));
        }
        parts.push("</tbody>".to_string());
    }

    parts.push("</table>".to_string());
    parts.join("\n")
}

/// Render a complete standalone HTML document.
pub fn render_document(blocks: &[Block], title: &str, extra_css: Option<&str>) -> String {
    let mut html = Vec::with_capacity(blocks.len() + 2);
    html.push(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>{}{}</style>\n</head>\n<body>",
        escape_html(title),
        PRINT_STYLESHEET,
        extra_css.unwrap_or_default(),
    ));
    html.extend(blocks.iter().map(render_block));
    html.push("</body>\n</html>\n".to_string());
    html.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::blocks::parse_blocks;

    fn body(md: &str) -> String {
        parse_blocks(md)
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_escape_basic() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_is_idempotent() {
        let once = escape_html("Tom & Jerry <3");
        let twice = escape_html(&once);
        assert_eq!(once, "Tom &amp; Jerry &lt;3");
        assert_eq!(twice, once);
        assert_eq!(escape_html("&amp; &#39; &#x2F;"), "&amp; &#39; &#x2F;");
    }

    #[test]
    fn test_escape_bare_ampersand_before_semicolon_text() {
        assert_eq!(escape_html("&copy; 2024"), "&copy; 2024");
        assert_eq!(escape_html("R&D; done"), "R&amp;D; done");
        assert_eq!(escape_html("a & b;"), "a &amp; b;");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_html("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=4 {
            let md = format!("{} Heading *{level}*", "#".repeat(level));
            assert_eq!(
                body(&md),
                format!("<h{level}>Heading <em>{level}</em></h{level}>")
            );
        }
    }

    #[test]
    fn test_paragraph_inline() {
        assert_eq!(
            body("Some **bold** and *italic* text."),
            "<p>Some <strong>bold</strong> and <em>italic</em> text.</p>"
        );
    }

    #[test]
    fn test_link_href_escaped() {
        assert_eq!(
            body("[q](https://x.io/?a=1&b=\"2\")"),
            "<p><a href=\"https://x.io/?a=1&amp;b=&quot;2&quot;\">q</a></p>"
        );
    }

    #[test]
    fn test_code_block_verbatim_and_escaped() {
        let html = body("```\n**not bold** <tag> & `tick` [x](y)\n```");
        assert_eq!(
            html,
            "<pre><code>**not bold** &lt;tag&gt; &amp; `tick` [x](y)</code></pre>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(body("- a\n- **b**"), "<ul>\n<li>a</li>\n<li><strong>b</strong></li>\n</ul>");
        assert_eq!(body("1. one\n2. two"), "<ol>\n<li>one</li>\n<li>two</li>\n</ol>");
        assert!(body("3. three").starts_with("<ol start=\"3\">"));
    }

    #[test]
    fn test_table_structure() {
        let html = body("| A | B |\n| --- | --- |\n| `1` | 2 |");
        assert_eq!(
            html,
            "<table>\n<thead><tr><th>A</th><th>B</th></tr></thead>\n<tbody>\n<tr><td><code>1</code></td><td>2</td></tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_table_without_body_rows() {
        let html = body("| Only | Header |\n|---|---|");
        assert!(html.contains("<th>Only</th><th>Header</th>"));
        assert!(!html.contains("<tbody>"));
    }

    #[test]
    fn test_ragged_table_does_not_fail() {
        let html = body("| A | B |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |");
        assert_eq!(html.matches("<td>").count(), 4);
    }

    #[test]
    fn test_rule_and_blank() {
        assert_eq!(body("a\n\n---\nb"), "<p>a</p>\n<p></p>\n<hr>\n<p>b</p>");
    }

    #[test]
    fn test_code_shows_entities_as_typed() {
        assert_eq!(
            body("```\nlet s = \"&lt;\";\n```"),
            "<pre><code>let s = \"&amp;lt;\";</code></pre>"
        );
        assert_eq!(body("Use `&amp;` here"), "<p>Use <code>&amp;amp;</code> here</p>");
        assert_eq!(escape_code("a < b && c"), "a &lt; b &amp;&amp; c");
        assert!(matches!(escape_code("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_document_shell() {
        let blocks = parse_blocks("# Hi");
        let doc = render_document(&blocks, "Q&A <draft>", Some("p { margin: 0; }"));
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
        assert!(doc.contains("@media print"));
        assert!(doc.contains("p { margin: 0; }</style>"));
        assert!(doc.contains("<h1>Hi</h1>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }
}
