//! Core domain types, error taxonomy, and the shared extractor contract
//! for office document text extraction.

pub mod error;
pub mod extractor;
pub mod locator;
pub mod types;

pub use error::{Error, Result};
pub use extractor::TextExtractor;
pub use locator::{resolve, Scope};
pub use types::{DocumentFormat, Source};
