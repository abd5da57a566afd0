//! Conversion entry points.
//!
//! The in-memory functions ([`markdown_to_html`], [`markdown_to_pdf`]) are
//! pure and infallible: malformed Markdown only degrades the output. The
//! file-to-file functions add the only fallible steps, reading the source
//! and writing the result.

use crate::config::ConversionConfig;
use crate::error::MdPrintError;
use crate::output::{ConversionStats, OutputFormat, RenderedPdf};
use crate::pipeline::blocks::{first_heading, parse_blocks, Block};
use crate::pipeline::inline::{parse_inline, plain_text};
use crate::pipeline::{flow, html, layout, pdf};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Title used when neither the config nor the document provides one.
pub const DEFAULT_TITLE: &str = "Document";

/// Convert Markdown text to a standalone HTML document.
///
/// # Example
/// ```rust
/// use mdprint::{markdown_to_html, ConversionConfig};
///
/// let html = markdown_to_html("# Title\n\nSome **bold** text.\n", &ConversionConfig::default());
/// assert!(html.contains("<h1>Title</h1>"));
/// assert!(html.contains("<strong>bold</strong>"));
/// ```
pub fn markdown_to_html(markdown: &str, config: &ConversionConfig) -> String {
    let blocks = parse_blocks(markdown);
    render_html(&blocks, config)
}

fn render_html(blocks: &[Block], config: &ConversionConfig) -> String {
    let title = document_title(blocks, config);
    html::render_document(blocks, &title, config.extra_css.as_deref())
}

/// Convert Markdown text to a paginated PDF.
pub fn markdown_to_pdf(markdown: &str, config: &ConversionConfig) -> RenderedPdf {
    let blocks = parse_blocks(markdown);
    let story = flow::build_story(&blocks);
    debug!("Built story of {} flowables from {} blocks", story.len(), blocks.len());

    let geometry = layout::PageGeometry::new(config.page_size, config.margin_pt);
    let pages = layout::layout(&story, &geometry);
    let title = document_title(&blocks, config);
    let bytes = pdf::write_pdf(&pages, &geometry, &title);

    RenderedPdf {
        bytes,
        page_count: pages.len(),
        block_count: blocks.len(),
    }
}

/// Convert a Markdown file to an HTML file.
pub fn convert_to_html(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, MdPrintError> {
    let start = Instant::now();
    let input = input.as_ref();
    info!("Converting {} to HTML", input.display());

    let markdown = read_markdown(input)?;
    let blocks = parse_blocks(&markdown);
    let document = render_html(&blocks, config);
    write_atomic(output.as_ref(), document.as_bytes())?;

    let stats = ConversionStats {
        format: OutputFormat::Html,
        blocks: blocks.len(),
        pages: None,
        bytes_written: document.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Wrote {} ({} blocks, {} bytes) in {}ms",
        output.as_ref().display(),
        stats.blocks,
        stats.bytes_written,
        stats.duration_ms
    );
    Ok(stats)
}

/// Convert a Markdown file to a PDF file.
pub fn convert_to_pdf(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, MdPrintError> {
    let start = Instant::now();
    let input = input.as_ref();
    info!("Converting {} to PDF", input.display());

    let markdown = read_markdown(input)?;
    let rendered = markdown_to_pdf(&markdown, config);
    write_atomic(output.as_ref(), &rendered.bytes)?;

    let stats = ConversionStats {
        format: OutputFormat::Pdf,
        blocks: rendered.block_count,
        pages: Some(rendered.page_count),
        bytes_written: rendered.bytes.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Wrote {} ({} pages, {} bytes) in {}ms",
        output.as_ref().display(),
        rendered.page_count,
        stats.bytes_written,
        stats.duration_ms
    );
    Ok(stats)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Configured title, else the first heading's visible text, else [`DEFAULT_TITLE`].
fn document_title(blocks: &[Block], config: &ConversionConfig) -> String {
    if let Some(ref title) = config.title {
        return title.clone();
    }
    first_heading(blocks)
        .map(|h| plain_text(&parse_inline(h)))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn read_markdown(path: &Path) -> Result<String, MdPrintError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| MdPrintError::from_read(path.to_path_buf(), e))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Write `bytes` to `path` via a sibling temp file and rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MdPrintError> {
    let write_err = |e| MdPrintError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, bytes).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        write_err(e)
    })
}
