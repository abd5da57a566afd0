//! Block scanning: group classified lines into document blocks.
//!
//! The scanner walks the source once, line by line, carrying an explicit
//! [`ScanState`]. Lines are never revisited: once a block is emitted it is
//! final. Three multi-line constructs need state:
//!
//! - **code blocks**: everything between two fence lines, kept verbatim
//! - **tables**: a contiguous run of table rows
//! - **lists**: a contiguous run of items with the same marker kind
//!
//! A code fence that is never closed swallows the rest of the input; those
//! trailing lines are dropped rather than flushed.

use super::classify::{classify, is_fence, LineKind, ListMarker};
use tracing::debug;

/// One block of the output document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    /// A single non-empty source line.
    Paragraph(String),
    List(List),
    /// Raw table rows, header first, separator second.
    Table(Vec<String>),
    /// Verbatim lines between two fences.
    CodeBlock(Vec<String>),
    HorizontalRule,
    Blank,
}

/// A run of consecutive list items of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub marker: ListMarker,
    pub text: String,
}

impl List {
    /// Number of the first item for ordered lists.
    pub fn start(&self) -> Option<u64> {
        match self.items.first()?.marker {
            ListMarker::Ordered(n) => Some(n),
            ListMarker::Bullet => None,
        }
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Text,
    Code(Vec<String>),
    Table(Vec<String>),
    List(List),
}

/// Line-by-line block scanner.
///
/// Use [`parse_blocks`] for whole documents; the scanner itself is exposed so
/// callers can feed lines incrementally.
#[derive(Debug, Default)]
pub struct BlockScanner {
    state: ScanState,
    blocks: Vec<Block>,
}

impl BlockScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one source line (without its line terminator).
    pub fn push_line(&mut self, line: &str) {
        if let ScanState::Code(lines) = &mut self.state {
            if is_fence(line) {
                let lines = std::mem::take(lines);
                self.state = ScanState::Text;
                self.blocks.push(Block::CodeBlock(lines));
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        let kind = classify(line);
        self.close_open_run(&kind);

        match kind {
            LineKind::Fence => self.state = ScanState::Code(Vec::new()),
            LineKind::TableRow => match &mut self.state {
                ScanState::Table(rows) => rows.push(line.to_string()),
                _ => self.state = ScanState::Table(vec![line.to_string()]),
            },
            LineKind::HorizontalRule => self.blocks.push(Block::HorizontalRule),
            LineKind::Heading { level, text } => self.blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            }),
            LineKind::ListItem { marker, text } => {
                let item = ListItem {
                    marker,
                    text: text.to_string(),
                };
                match &mut self.state {
                    ScanState::List(list) => list.items.push(item),
                    _ => {
                        self.state = ScanState::List(List {
                            ordered: marker.is_ordered(),
                            items: vec![item],
                        })
                    }
                }
            }
            LineKind::Blank => self.blocks.push(Block::Blank),
            LineKind::Paragraph(text) => self.blocks.push(Block::Paragraph(text.to_string())),
        }
    }

    /// Flush any open table or list the incoming line does not continue.
    fn close_open_run(&mut self, next: &LineKind<'_>) {
        let continues = match (&self.state, next) {
            (ScanState::Table(_), LineKind::TableRow) => true,
            (ScanState::List(list), LineKind::ListItem { marker, .. }) => {
                list.ordered == marker.is_ordered()
            }
            (ScanState::Text, _) => true,
            _ => false,
        };
        if !continues {
            self.flush();
        }
    }

    fn flush(&mut self) {
        match std::mem::take(&mut self.state) {
            ScanState::Text => {}
            ScanState::Table(rows) => self.blocks.push(Block::Table(rows)),
            ScanState::List(list) => self.blocks.push(Block::List(list)),
            ScanState::Code(lines) => {
                debug!(
                    "Unterminated code fence: dropping {} trailing line(s)",
                    lines.len()
                );
            }
        }
    }

    /// Finish scanning and return the blocks in source order.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Split a Markdown document into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut scanner = BlockScanner::new();
    for line in markdown.lines() {
        scanner.push_line(line);
    }
    scanner.finish()
}

/// Text of the first heading, if any; used as a fallback document title.
pub fn first_heading(blocks: &[Block]) -> Option<&str> {
    blocks.iter().find_map(|b| match b {
        Block::Heading { text, .. } if !text.is_empty() => Some(text.as_str()),
        _ => None,
    })
}
