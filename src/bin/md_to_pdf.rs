//! CLI binary `md_to_pdf`.
//!
//! Converts a Markdown file into a paginated PDF using the built-in layout
//! engine and the Standard-14 fonts.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use mdprint::{convert_to_pdf, ConversionConfig, PageSize};
use std::path::PathBuf;

const USAGE: &str = "Usage: md_to_pdf <input.md> <output.pdf>";

/// Convert Markdown to a paginated PDF document.
#[derive(Parser, Debug)]
#[command(
    name = "md_to_pdf",
    version,
    about = "Convert Markdown to a paginated PDF document",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,

    /// PDF file to write.
    output: PathBuf,

    /// Document title stored in the PDF metadata (default: first heading).
    #[arg(long, env = "MDPRINT_TITLE")]
    title: Option<String>,

    /// Page size.
    #[arg(long, env = "MDPRINT_PAGE_SIZE", value_enum, default_value = "letter")]
    page_size: PageSizeArg,

    /// Margin on every page edge, in points.
    #[arg(long, env = "MDPRINT_MARGIN", default_value_t = 72.0)]
    margin: f32,

    /// Print conversion stats as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDPRINT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDPRINT_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PageSizeArg {
    Letter,
    A4,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

fn main() -> Result<()> {
    let cli: Cli = common::parse_or_exit(USAGE);
    common::init_logging(cli.verbose, cli.quiet);

    let mut builder = ConversionConfig::builder()
        .page_size(cli.page_size.clone().into())
        .margin_pt(cli.margin);
    if let Some(ref title) = cli.title {
        builder = builder.title(title);
    }
    let config = builder.build().context("Invalid configuration")?;

    let stats = convert_to_pdf(&cli.input, &cli.output, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        println!("PDF created: {}", cli.output.display());
    }

    Ok(())
}
