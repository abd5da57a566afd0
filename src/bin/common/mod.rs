//! Helpers shared by the `md_to_html` and `md_to_pdf` binaries.

use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

/// Parse CLI arguments; on any usage error print `usage` and exit with status 1.
///
/// `--help` and `--version` keep clap's behaviour (print, exit 0).
pub fn parse_or_exit<T: Parser>(usage: &str) -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            println!("{usage}");
            std::process::exit(1);
        }
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}
