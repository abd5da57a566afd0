//! Page layout: flow a story onto fixed-size pages.
//!
//! The engine keeps a single vertical cursor inside the *frame* (the page
//! minus its margins) and places content top to bottom:
//!
//! - paragraphs are word-wrapped to the frame width minus the style's
//!   indents, one line of `leading` height at a time;
//! - preformatted text is placed line by line without wrapping;
//! - spacers move the cursor down.
//!
//! Whenever the next line would cross the bottom margin a new page starts.
//! `space_before` is not applied at the top of a page, and a spacer that
//! does not fit is dropped together with the page break it caused. There is
//! no other page-break control.

use super::flow::{Flowable, ParagraphStyle, Rgb, Span, StyleName};
use super::fonts::Font;
use crate::config::PageSize;
use tracing::debug;

/// Page size and printable frame, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn new(size: PageSize, margin: f32) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn frame_top(&self) -> f32 {
        self.height - self.margin
    }

    fn frame_bottom(&self) -> f32 {
        self.margin
    }
}

/// A run of text in a single font.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub font: Font,
    pub size: f32,
    pub text: String,
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub baseline: f32,
    pub color: Rgb,
    pub runs: Vec<Run>,
}

impl PlacedLine {
    /// Visible text of the line with font changes removed.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The content of one output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Lay out a story; always returns at least one (possibly empty) page.
pub fn layout(story: &[Flowable], geometry: &PageGeometry) -> Vec<Page> {
    let mut paginator = Paginator::new(*geometry);
    for flowable in story {
        match flowable {
            Flowable::Paragraph { style, spans } => {
                let style = style.style();
                let width = geometry.frame_width() - style.left_indent - style.right_indent;
                let lines = wrap_spans(spans, &style, width);
                paginator.place_block(&style, lines);
            }
            Flowable::Preformatted { text } => {
                let style = StyleName::CodeBlock.style();
                let lines = text
                    .split('\n')
                    .map(|line| {
                        vec![Run {
                            font: style.font,
                            size: style.font_size,
                            text: line.to_string(),
                        }]
                    })
                    .collect();
                paginator.place_block(&style, lines);
            }
            Flowable::Spacer { height } => paginator.space(*height),
        }
    }
    paginator.finish()
}

struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl Paginator {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: geometry.frame_top(),
        }
    }

    fn at_top(&self) -> bool {
        self.cursor >= self.geometry.frame_top()
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor = self.geometry.frame_top();
        debug!("Page break before page {}", self.pages.len() + 1);
    }

    fn space(&mut self, height: f32) {
        if self.cursor - height < self.geometry.frame_bottom() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn place_block(&mut self, style: &ParagraphStyle, lines: Vec<Vec<Run>>) {
        if !self.at_top() {
            self.space(style.space_before);
        }
        for runs in lines {
            if self.cursor - style.leading < self.geometry.frame_bottom() && !self.at_top() {
                self.new_page();
            }
            let baseline = self.cursor - style.font_size;
            self.current.lines.push(PlacedLine {
                x: self.geometry.margin + style.left_indent,
                baseline,
                color: style.color,
                runs,
            });
            self.cursor -= style.leading;
        }
        self.space(style.space_after);
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

// ── Word wrapping ────────────────────────────────────────────────────────────

/// A word: consecutive non-space characters, possibly spanning several fonts.
#[derive(Debug, Default)]
struct Word {
    pieces: Vec<Run>,
    width: f32,
}

impl Word {
    fn push(&mut self, font: Font, size: f32, c: char) {
        self.width += f32::from(font.char_width(c)) * size / 1000.0;
        match self.pieces.last_mut() {
            Some(run) if run.font == font && run.size == size => run.text.push(c),
            _ => self.pieces.push(Run {
                font,
                size,
                text: c.to_string(),
            }),
        }
    }
}

/// Greedily wrap styled spans into lines no wider than `max_width`.
///
/// A single word wider than the line is placed alone and overflows.
pub fn wrap_spans(spans: &[Span], style: &ParagraphStyle, max_width: f32) -> Vec<Vec<Run>> {
    let words = split_words(spans, style);
    let space = style.font.text_width(" ", style.font_size);

    let mut lines: Vec<Vec<Run>> = Vec::new();
    let mut line: Vec<Run> = Vec::new();
    let mut line_width = 0.0;

    for word in words {
        if !line.is_empty() && line_width + space + word.width > max_width {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
        }
        if !line.is_empty() {
            if let Some(last) = line.last_mut() {
                last.text.push(' ');
            }
            line_width += space;
        }
        line_width += word.width;
        for piece in word.pieces {
            match line.last_mut() {
                Some(run) if run.font == piece.font && run.size == piece.size => {
                    run.text.push_str(&piece.text)
                }
                _ => line.push(piece),
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_words(spans: &[Span], style: &ParagraphStyle) -> Vec<Word> {
    let mut words = Vec::new();
    let mut word = Word::default();
    for span in spans {
        let (font, size) = span.font(style);
        for c in span.text.chars() {
            if c.is_whitespace() {
                if !word.pieces.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            } else {
                word.push(font, size, c);
            }
        }
    }
    if !word.pieces.is_empty() {
        words.push(word);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::flow::{SpanStyle, INCH};

    fn letter() -> PageGeometry {
        PageGeometry::new(PageSize::Letter, 72.0)
    }

    fn para(text: &str) -> Flowable {
        Flowable::Paragraph {
            style: StyleName::Normal,
            spans: vec![Span::regular(text)],
        }
    }

    #[test]
    fn test_frame_width() {
        assert_eq!(letter().frame_width(), 468.0);
    }

    #[test]
    fn test_empty_story_yields_one_page() {
        let pages = layout(&[], &letter());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_first_line_position() {
        let pages = layout(&[para("Hello world")], &letter());
        let line = &pages[0].lines[0];
        assert_eq!(line.x, 72.0);
        assert_eq!(line.baseline, 792.0 - 72.0 - 10.0);
        assert_eq!(line.text(), "Hello world");
    }

    #[test]
    fn test_wrap_respects_width() {
        let style = StyleName::Normal.style();
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let lines = wrap_spans(&[Span::regular(text)], &style, 200.0);
        assert!(lines.len() > 1);
        for runs in &lines {
            let width: f32 = runs.iter().map(|r| r.font.text_width(&r.text, r.size)).sum();
            assert!(width <= 200.0 + 0.01, "line too wide: {width}");
        }
    }

    #[test]
    fn test_long_word_overflows_alone() {
        let style = StyleName::Normal.style();
        let word = "x".repeat(200);
        let lines = wrap_spans(&[Span::regular(format!("a {word} b"))], &style, 100.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1][0].text, word);
    }

    #[test]
    fn test_mixed_fonts_share_a_line() {
        let style = StyleName::Normal.style();
        let spans = vec![
            Span::regular("Some "),
            Span { style: SpanStyle::Bold, text: "bold".into() },
            Span::regular(", text"),
        ];
        let lines = wrap_spans(&spans, &style, 400.0);
        assert_eq!(lines.len(), 1);
        let fonts: Vec<Font> = lines[0].iter().map(|r| r.font).collect();
        assert_eq!(fonts, vec![Font::Helvetica, Font::HelveticaBold, Font::Helvetica]);
        let text: String = lines[0].iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "Some bold, text");
    }

    #[test]
    fn test_long_story_paginates() {
        let story: Vec<Flowable> = (0..200).map(|i| para(&format!("Line {i}"))).collect();
        let pages = layout(&story, &letter());
        // 648pt frame / 12pt leading = 54 lines per page.
        assert_eq!(pages.len(), 4);
        assert_eq!(pages[0].lines.len(), 54);
        for page in &pages {
            for line in &page.lines {
                assert!(line.baseline >= 72.0 - 12.0, "line below margin");
            }
        }
    }

    #[test]
    fn test_spacer_never_forces_page_break_when_it_fits() {
        let story = vec![para("a"), Flowable::Spacer { height: 0.3 * INCH }, para("b")];
        let pages = layout(&story, &letter());
        assert_eq!(pages.len(), 1);
        let gap = pages[0].lines[0].baseline - pages[0].lines[1].baseline;
        assert!((gap - (12.0 + 21.6)).abs() < 0.01, "gap was {gap}");
    }

    #[test]
    fn test_preformatted_keeps_lines_and_indent() {
        let story = vec![Flowable::Preformatted {
            text: "fn main() {\n    body();\n}".into(),
        }];
        let pages = layout(&story, &letter());
        let lines = &pages[0].lines;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text(), "    body();");
        assert_eq!(lines[0].x, 92.0);
        assert_eq!(lines[0].runs[0].font, Font::Courier);
    }

    #[test]
    fn test_space_before_skipped_at_page_top() {
        let story = vec![Flowable::Paragraph {
            style: StyleName::Heading1,
            spans: vec![Span::regular("Top")],
        }];
        let pages = layout(&story, &letter());
        assert_eq!(pages[0].lines[0].baseline, 720.0 - 18.0);
    }
}
