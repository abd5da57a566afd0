//! CLI binary `md_to_html`.
//!
//! Converts a Markdown file into a standalone HTML page ready for printing.
//! Producing a PDF from it is left to a browser or an HTML-to-PDF tool.

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use mdprint::{convert_to_html, ConversionConfig};
use std::path::PathBuf;

const USAGE: &str = "Usage: md_to_html <input.md> <output.html>";

/// Convert Markdown to a print-friendly standalone HTML document.
#[derive(Parser, Debug)]
#[command(
    name = "md_to_html",
    version,
    about = "Convert Markdown to a print-friendly standalone HTML document",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,

    /// HTML file to write.
    output: PathBuf,

    /// Document title (default: first heading).
    #[arg(long, env = "MDPRINT_TITLE")]
    title: Option<String>,

    /// CSS file appended after the built-in print stylesheet.
    #[arg(long, env = "MDPRINT_CSS")]
    css: Option<PathBuf>,

    /// Print conversion stats as JSON instead of the summary lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDPRINT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDPRINT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli: Cli = common::parse_or_exit(USAGE);
    common::init_logging(cli.verbose, cli.quiet);

    let mut builder = ConversionConfig::builder();
    if let Some(ref title) = cli.title {
        builder = builder.title(title);
    }
    if let Some(ref path) = cli.css {
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet from {:?}", path))?;
        builder = builder.extra_css(css);
    }
    let config = builder.build().context("Invalid configuration")?;

    let stats = convert_to_html(&cli.input, &cli.output, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        println!("HTML created: {}", cli.output.display());
        println!(
            "To convert to PDF, use: wkhtmltopdf {} output.pdf (or open it in a browser and print to PDF)",
            cli.output.display()
        );
    }

    Ok(())
}
