//! Error types for tola-textdiff.
//!
//! The tokenizer, aligner and renderer are total functions and never fail.
//! Everything here belongs to input acquisition: every variant names the file
//! that could not be turned into text.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading a document for comparison.
#[derive(Debug, Error)]
pub enum Error {
    /// The file extension is not one of the recognized source kinds.
    #[error("unsupported file type: {}; please use .txt or .docx", path.display())]
    UnsupportedFileType {
        /// The rejected path
        path: PathBuf,
    },

    /// The source kind is recognized but support for it was not compiled in.
    #[error("{kind} support is not available: rebuild with the `{feature}` feature to read {}", path.display())]
    MissingCapability {
        /// Human-readable source kind (e.g. "word document")
        kind: &'static str,
        /// Cargo feature that enables it
        feature: &'static str,
        /// The file that needed it
        path: PathBuf,
    },

    /// The underlying read failed (not found, permission denied, ...).
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read
        path: PathBuf,
        /// OS error, surfaced verbatim
        #[source]
        source: io::Error,
    },

    /// A plain-text file is not valid UTF-8.
    #[error("{} is not valid UTF-8 text", path.display())]
    InvalidUtf8 {
        /// The offending file
        path: PathBuf,
    },

    /// A word document could not be unpacked or parsed.
    #[error("failed to parse word document {}: {message}", path.display())]
    Docx {
        /// The offending file
        path: PathBuf,
        /// What went wrong inside the container
        message: String,
    },
}

/// Result type alias for document loading.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a word-document parse error from any displayable cause.
    pub fn docx(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Docx {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// The file this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedFileType { path }
            | Self::MissingCapability { path, .. }
            | Self::Io { path, .. }
            | Self::InvalidUtf8 { path }
            | Self::Docx { path, .. } => path,
        }
    }
}
