//! Flow document model for the PDF converter.
//!
//! The block sequence is turned into a *story*: an ordered list of
//! [`Flowable`]s, each tagged with a named [`StyleName`]. The story knows
//! nothing about pages; [`super::layout`] decides where each piece lands.
//!
//! Mapping from blocks:
//!
//! | Block             | Flowables                                       |
//! |-------------------|-------------------------------------------------|
//! | heading 1/2/3(/4) | paragraph in Heading1/2/3 + 0.2/0.15/0.1 in spacer |
//! | paragraph         | Normal paragraph                                |
//! | list item         | Normal paragraph prefixed `• ` or `N. `         |
//! | table row         | Normal paragraph with the raw row text          |
//! | code block        | preformatted + 0.2 in spacer (skipped if empty) |
//! | horizontal rule   | 0.3 in spacer                                   |
//! | blank line        | 0.1 in spacer                                   |

use super::blocks::Block;
use super::classify::ListMarker;
use super::fonts::Font;
use super::inline::{parse_inline, Inline};

/// Points per inch.
pub const INCH: f32 = 72.0;

/// Named paragraph styles of the print layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleName {
    Normal,
    Heading1,
    Heading2,
    Heading3,
    CodeBlock,
}

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

    /// Grey from a single `#xxxxxx`-style channel value.
    fn grey(v: u8) -> Rgb {
        let c = v as f32 / 255.0;
        Rgb(c, c, c)
    }
}

/// Resolved paragraph style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub color: Rgb,
}

impl StyleName {
    pub fn style(self) -> ParagraphStyle {
        let base = ParagraphStyle {
            font: Font::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            color: Rgb::BLACK,
        };
        let heading = ParagraphStyle {
            font: Font::HelveticaBold,
            ..base
        };
        match self {
            StyleName::Normal => base,
            StyleName::Heading1 => ParagraphStyle {
                font_size: 18.0,
                leading: 22.0,
                space_before: 12.0,
                space_after: 12.0,
                color: Rgb::grey(0x1a),
                ..heading
            },
            StyleName::Heading2 => ParagraphStyle {
                font_size: 14.0,
                leading: 18.0,
                space_before: 10.0,
                space_after: 10.0,
                color: Rgb::grey(0x2a),
                ..heading
            },
            StyleName::Heading3 => ParagraphStyle {
                font_size: 12.0,
                leading: 14.4,
                space_before: 8.0,
                space_after: 8.0,
                color: Rgb::grey(0x3a),
                ..heading
            },
            StyleName::CodeBlock => ParagraphStyle {
                font: Font::Courier,
                font_size: 8.0,
                leading: 8.8,
                space_before: 10.0,
                space_after: 10.0,
                left_indent: 20.0,
                right_indent: 20.0,
                ..base
            },
        }
    }
}

/// How an inline span is set relative to its paragraph's base font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
    Code,
}

impl SpanStyle {
    /// Style of text nested inside a `self` span that adds `marker`.
    fn nest(self, marker: SpanStyle) -> SpanStyle {
        match (self, marker) {
            (SpanStyle::Regular, m) => m,
            (SpanStyle::Bold, SpanStyle::Italic) | (SpanStyle::Italic, SpanStyle::Bold) => {
                SpanStyle::BoldItalic
            }
            (outer, _) => outer,
        }
    }
}

/// A run of text in one inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: SpanStyle,
    pub text: String,
}

impl Span {
    pub fn regular(text: impl Into<String>) -> Self {
        Span {
            style: SpanStyle::Regular,
            text: text.into(),
        }
    }

    /// Concrete font and size for this span inside a paragraph of `para`.
    pub fn font(&self, para: &ParagraphStyle) -> (Font, f32) {
        match self.style {
            SpanStyle::Regular => (para.font, para.font_size),
            SpanStyle::Bold => (Font::HelveticaBold, para.font_size),
            SpanStyle::Italic if para.font == Font::HelveticaBold => {
                (Font::HelveticaBoldOblique, para.font_size)
            }
            SpanStyle::Italic => (Font::HelveticaOblique, para.font_size),
            SpanStyle::BoldItalic => (Font::HelveticaBoldOblique, para.font_size),
            SpanStyle::Code => (Font::Courier, (para.font_size - 1.0).max(1.0)),
        }
    }
}

/// One unit of paginated content.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// Wrapped text in a named style.
    Paragraph { style: StyleName, spans: Vec<Span> },
    /// Unwrapped monospace lines in the CodeBlock style.
    Preformatted { text: String },
    /// Vertical gap in points.
    Spacer { height: f32 },
}

/// Flatten inline tokens into styled spans; nested bold and italic combine.
pub fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    push_spans(&parse_inline(text), SpanStyle::Regular, &mut spans);
    spans
}

fn push_spans(tokens: &[Inline], style: SpanStyle, out: &mut Vec<Span>) {
    for token in tokens {
        match token {
            Inline::Text(t) => out.push(Span {
                style,
                text: t.clone(),
            }),
            Inline::Code(t) => out.push(Span {
                style: SpanStyle::Code,
                text: t.clone(),
            }),
            Inline::Strong(inner) => push_spans(inner, style.nest(SpanStyle::Bold), out),
            Inline::Emphasis(inner) => push_spans(inner, style.nest(SpanStyle::Italic), out),
            // Paper has no hyperlinks; only the label is printed.
            Inline::Link { label, .. } => push_spans(label, style, out),
        }
    }
}

fn paragraph(style: StyleName, spans: Vec<Span>) -> Flowable {
    Flowable::Paragraph { style, spans }
}

fn spacer(height: f32) -> Flowable {
    Flowable::Spacer { height }
}

/// Build the PDF story from a block sequence.
pub fn build_story(blocks: &[Block]) -> Vec<Flowable> {
    let mut story = Vec::with_capacity(blocks.len() * 2);

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let (style, gap) = match level {
                    1 => (StyleName::Heading1, 0.2 * INCH),
                    2 => (StyleName::Heading2, 0.15 * INCH),
                    _ => (StyleName::Heading3, 0.1 * INCH),
                };
                story.push(paragraph(style, inline_spans(text)));
                story.push(spacer(gap));
            }
            Block::Paragraph(text) => story.push(paragraph(StyleName::Normal, inline_spans(text))),
            Block::List(list) => {
                for item in &list.items {
                    let prefix = match item.marker {
                        ListMarker::Bullet => "\u{2022} ".to_string(),
                        ListMarker::Ordered(n) => format!("{n}. "),
                    };
                    let mut spans = vec![Span::regular(prefix)];
                    spans.extend(inline_spans(&item.text));
                    story.push(paragraph(StyleName::Normal, spans));
                }
            }
            Block::Table(rows) => {
                for row in rows {
                    story.push(paragraph(StyleName::Normal, inline_spans(row.trim())));
                }
            }
            Block::CodeBlock(lines) => {
                if !lines.is_empty() {
                    story.push(Flowable::Preformatted {
                        text: lines.join("\n"),
                    });
                    story.push(spacer(0.2 * INCH));
                }
            }
            Block::HorizontalRule => story.push(spacer(0.3 * INCH)),
            Block::Blank => story.push(spacer(0.1 * INCH)),
        }
    }

    story
}
