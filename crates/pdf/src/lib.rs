//! PDF backend for page-scoped text extraction.
//!
//! Page text comes from the `pdf-extract` content-stream interpreter;
//! this crate only validates input, selects pages, and joins them.

pub mod extractor;

pub use extractor::PdfExtractor;
