//! Input acquisition.
//!
//! Turns a file path into the text that gets compared. The kind of file is
//! decided by its extension (case-insensitive):
//!
//! | Extension | Kind           | Text                                    |
//! |-----------|----------------|-----------------------------------------|
//! | `.txt`    | `PlainText`    | file contents, verbatim UTF-8           |
//! | `.docx`   | `WordDocument` | body paragraphs joined with `\n`        |
//!
//! Anything else is rejected before it is read. The extension is the part of
//! the file name after its last dot, so a file named just `.txt` (a hidden
//! file with no extension) is rejected too.

#[cfg(feature = "docx")]
mod docx;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Recognized kinds of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// UTF-8 text, read verbatim.
    PlainText,
    /// Office Open XML word-processing document.
    WordDocument,
}

impl SourceKind {
    /// Detect the kind of a file from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("txt") => Ok(Self::PlainText),
            Some("docx") => Ok(Self::WordDocument),
            _ => Err(Error::UnsupportedFileType { path: path.to_path_buf() }),
        }
    }

    /// Human-readable name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainText => "plain text",
            Self::WordDocument => "word document",
        }
    }

}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Load the text of a document.
///
/// # Errors
///
/// - [`Error::UnsupportedFileType`] for unknown extensions
/// - [`Error::MissingCapability`] for `.docx` in a build without the `docx` feature
/// - [`Error::Io`] when the file cannot be read
/// - [`Error::InvalidUtf8`] / [`Error::Docx`] when the contents cannot be decoded
pub fn load_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let kind = SourceKind::from_path(path)?;
    tracing::debug!(path = %path.display(), %kind, "loading document");

    match kind {
        SourceKind::PlainText => read_plain(path),
        SourceKind::WordDocument => read_word(path),
    }
}

fn read_plain(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { path: path.to_path_buf() })
}

#[cfg(feature = "docx")]
fn read_word(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    docx::extract_text(&bytes).map_err(|message| Error::docx(path, message))
}

#[cfg(not(feature = "docx"))]
fn read_word(path: &Path) -> Result<String> {
    Err(Error::MissingCapability {
        kind: SourceKind::WordDocument.name(),
        feature: "docx",
        path: path.to_path_buf(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a.txt")).unwrap(), SourceKind::PlainText);
        assert_eq!(SourceKind::from_path(Path::new("dir/B.TXT")).unwrap(), SourceKind::PlainText);
        assert_eq!(SourceKind::from_path(Path::new("report.Docx")).unwrap(), SourceKind::WordDocument);
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["notes.pdf", "legacy.doc", "README", "archive.txt.gz", ".txt", "dir/.docx"] {
            let err = SourceKind::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedFileType { .. }), "{name}");
        }
    }

    #[test]
    fn test_unsupported_is_rejected_before_reading() {
        // The file does not exist; the extension check must fail first
        let err = load_text("does/not/exist.rtf").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_text("does/not/exist.txt").unwrap_err();
        match err {
            Error::Io { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[cfg(not(feature = "docx"))]
    #[test]
    fn test_word_without_feature_is_capability_error() {
        let err = load_text("report.docx").unwrap_err();
        assert!(matches!(err, Error::MissingCapability { feature: "docx", .. }));
    }
}
