//! Plain text extraction from office documents.
//!
//! A [`Document`] resolves its format from the file name, then delegates to
//! the matching extractor:
//!
//! ```no_run
//! use doctext::Document;
//!
//! let deck = Document::open("talk.pptx")?;
//! let everything = deck.extract_all()?;
//! let second = deck.extract_slide(2)?;
//! # Ok::<(), doctext::Error>(())
//! ```

pub mod dispatch;
pub mod document;

pub use dispatch::Extractor;
pub use document::{extract_file, Document};

pub use doctext_core::{DocumentFormat, Error, Result, Scope, Source, TextExtractor};
pub use doctext_docx::DocxExtractor;
pub use doctext_pdf::PdfExtractor;
pub use doctext_pptx::{PptxExtractor, SlideLayout};
