//! Result types returned by the conversion entry points.

use serde::Serialize;

/// Target document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Pdf,
}

/// A rendered PDF held in memory.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
    /// Number of pages produced by the layout engine.
    pub page_count: usize,
    /// Number of source blocks the story was built from.
    pub block_count: usize,
}

/// Summary of a file-to-file conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub format: OutputFormat,
    /// Blocks recognised in the source (headings, paragraphs, lists, …).
    pub blocks: usize,
    /// Page count; `None` for HTML, which is paginated by the browser.
    pub pages: Option<usize>,
    pub bytes_written: usize,
    pub duration_ms: u64,
}
