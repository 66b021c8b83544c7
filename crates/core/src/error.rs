//! Error types for document text extraction.

use crate::types::DocumentFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document text extraction.
///
/// Every variant names the offending input: a path, an archive entry,
/// or the requested locator.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The declared file type is not one of the supported formats.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// A supported format was handed to the extractor of another format.
    #[error("{declared} file given to the {expected} extractor")]
    FormatMismatch {
        expected: DocumentFormat,
        declared: DocumentFormat,
    },

    /// The package could not be opened as a ZIP container.
    #[error("Corrupt archive '{source_name}': {reason}")]
    CorruptArchive { source_name: String, reason: String },

    /// A named archive entry is absent.
    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    /// An archive entry is not valid UTF-8 text.
    #[error("Failed to decode entry '{entry}': {reason}")]
    DecodeError { entry: String, reason: String },

    /// A slide part matches the naming convention but has no usable number.
    #[error("Malformed slide name '{name}': {reason}")]
    MalformedSlideName { name: String, reason: String },

    /// A slide part is not well-formed markup.
    #[error("Invalid slide markup in '{entry}': {reason}")]
    InvalidSlideMarkup { entry: String, reason: String },

    /// The requested page or slide is outside `[1, available]`.
    #[error("Invalid page or slide number: {requested} (document has {available})")]
    LocatorOutOfRange { requested: i64, available: usize },

    /// A locator was supplied for a format without sub-document addressing.
    #[error("Page or slide extraction is not supported for {0} files")]
    UnsupportedLocator(DocumentFormat),

    /// A format collaborator (PDF or DOCX reader) rejected the document.
    #[error("Failed to extract text from {format}: {message}")]
    ExtractionError {
        format: DocumentFormat,
        message: String,
    },

    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
