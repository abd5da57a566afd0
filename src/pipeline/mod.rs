//! Pipeline stages for Markdown conversion.
//!
//! Each submodule implements exactly one transformation step. The first three
//! stages are shared by both converters; rendering splits by output format.
//!
//! ## Data Flow
//!
//! ```text
//! classify ──▶ blocks ──┬──▶ html                          (String)
//!     inline ───────────┤
//!                       └──▶ flow ──▶ layout ──▶ pdf       (Vec<u8>)
//!                                       ▲
//!                                     fonts
//! ```
//!
//! 1. [`classify`] — decide what kind of line each source line is
//! 2. [`blocks`]   — group lines into blocks, tracking code/table/list state
//! 3. [`inline`]   — tokenize bold, italic, inline code and links
//! 4. [`html`]     — serialise blocks into a styled standalone HTML page
//! 5. [`flow`]     — map blocks to styled flow objects (the PDF story)
//! 6. [`layout`]   — word-wrap and paginate the story
//! 7. [`pdf`]      — write pages, fonts and content streams
//!
//! [`fonts`] holds the Standard-14 metrics and text encoding that
//! [`layout`] and [`pdf`] share.

pub mod blocks;
pub mod classify;
pub mod flow;
pub mod fonts;
pub mod html;
pub mod inline;
pub mod layout;
pub mod pdf;
