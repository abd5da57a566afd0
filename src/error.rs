//! Error types for the mdprint library.
//!
//! Only I/O and configuration problems are errors. Markdown that does not
//! match any known pattern is never rejected: it degrades into a paragraph or
//! visually imperfect output, so there is no "parse error" variant here.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdprint library.
#[derive(Debug, Error)]
pub enum MdPrintError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MdPrintError {
    /// Map an [`std::io::Error`] raised while reading `path` to the matching variant.
    pub(crate) fn from_read(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => MdPrintError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => MdPrintError::PermissionDenied { path },
            _ => MdPrintError::InputReadFailed { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn file_not_found_display() {
        let e = MdPrintError::FileNotFound {
            path: PathBuf::from("guide.md"),
        };
        assert!(e.to_string().contains("guide.md"), "got: {e}");
    }

    #[test]
    fn read_error_maps_not_found() {
        let e = MdPrintError::from_read(
            PathBuf::from("missing.md"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(e, MdPrintError::FileNotFound { .. }));
    }

    #[test]
    fn read_error_maps_permission_denied() {
        let e = MdPrintError::from_read(
            PathBuf::from("secret.md"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(e, MdPrintError::PermissionDenied { .. }));
    }

    #[test]
    fn read_error_keeps_source_for_other_kinds() {
        let e = MdPrintError::from_read(
            PathBuf::from("binary.md"),
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        assert!(e.to_string().contains("valid UTF-8"), "got: {e}");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn output_write_failed_display() {
        let e = MdPrintError::OutputWriteFailed {
            path: PathBuf::from("/readonly/out.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/readonly/out.pdf"), "got: {msg}");
        assert!(msg.contains("read-only"), "got: {msg}");
    }
}
