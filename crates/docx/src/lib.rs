//! DOCX (Office Open XML) backend for plain text extraction.
//!
//! Word documents have no fixed pagination, so this backend only
//! extracts whole documents and rejects page locators.

pub mod extractor;

pub use extractor::DocxExtractor;
