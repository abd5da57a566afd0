//! # mdprint
//!
//! Convert Markdown documents into print-ready output: a standalone styled
//! HTML page, or a paginated PDF.
//!
//! Both converters read the same informal Markdown subset in a single pass:
//! headings `#`..`####`, fenced code blocks, pipe tables with a separator
//! row, `-`/`*` and `1.` lists, `---`/`___`/`***` rules, and inline
//! `**bold**`, `*italic*`, `` `code` `` and `[links](url)`. Anything else is
//! a paragraph. This is deliberately not a CommonMark parser.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Classify  one category per line (fence, table, rule, heading, list, blank, text)
//!  ├─ 2. Blocks    group lines into code blocks, tables, lists
//!  ├─ 3. Inline    bold / italic / code / links on non-code text
//!  └─ 4. Render
//!        ├─ HTML   flat string with embedded print stylesheet
//!        └─ PDF    flow objects → word wrap + pagination → pdf-writer
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdprint::{convert_to_html, convert_to_pdf, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     convert_to_html("guide.md", "guide.html", &config)?;
//!     let stats = convert_to_pdf("guide.md", "guide.pdf", &config)?;
//!     eprintln!("{} pages", stats.pages.unwrap_or(0));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md_to_html` and `md_to_pdf` binaries (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSize};
pub use convert::{convert_to_html, convert_to_pdf, markdown_to_html, markdown_to_pdf};
pub use error::MdPrintError;
pub use output::{ConversionStats, OutputFormat, RenderedPdf};
pub use pipeline::blocks::{parse_blocks, Block};
pub use pipeline::classify::{classify, LineKind};
pub use pipeline::html::escape_html;
pub use pipeline::inline::{parse_inline, Inline};
