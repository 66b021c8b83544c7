//! Document handle: a validated source bound to its extractor.

use crate::dispatch::Extractor;
use doctext_core::{DocumentFormat, Error, Result, Source, TextExtractor};
use std::path::{Path, PathBuf};

/// An input document with its recognized format.
///
/// The format is resolved from the name when the handle is created, before
/// the file is read. Every extraction call reads the source afresh.
#[derive(Debug, Clone)]
pub struct Document {
    source: Source,
    extractor: Extractor,
}

impl Document {
    /// Open a document on disk.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_source(Source::Path(path.into()))
    }

    /// Wrap an in-memory document whose `name` declares its format.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_source(Source::bytes(name, data))
    }

    /// Bind a source to the extractor for its declared format.
    pub fn from_source(source: Source) -> Result<Self> {
        let extractor = Extractor::for_name(&source.name())?;
        Ok(Self { source, extractor })
    }

    /// Replace the default extractor, e.g. with a configured one.
    ///
    /// The extractor must handle this document's format.
    pub fn with_extractor(mut self, extractor: impl Into<Extractor>) -> Result<Self> {
        let extractor = extractor.into();
        if extractor.format() != self.format() {
            return Err(Error::FormatMismatch {
                expected: extractor.format(),
                declared: self.format(),
            });
        }
        self.extractor = extractor;
        Ok(self)
    }

    /// The recognized format.
    pub fn format(&self) -> DocumentFormat {
        self.extractor.format()
    }

    /// The underlying source.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Extract the whole document, or one 1-based page or slide.
    pub fn extract(&self, locator: Option<i64>) -> Result<String> {
        self.extractor.extract(&self.source, locator)
    }

    /// Extract the whole document.
    pub fn extract_all(&self) -> Result<String> {
        self.extract(None)
    }

    /// Extract one 1-based page of a PDF.
    pub fn extract_page(&self, page: i64) -> Result<String> {
        self.require(DocumentFormat::Pdf)?;
        self.extract(Some(page))
    }

    /// Extract one 1-based slide of a PPTX.
    pub fn extract_slide(&self, slide: i64) -> Result<String> {
        self.require(DocumentFormat::Pptx)?;
        self.extract(Some(slide))
    }

    fn require(&self, format: DocumentFormat) -> Result<()> {
        if self.format() != format {
            return Err(Error::UnsupportedLocator(self.format()));
        }
        Ok(())
    }
}

/// Extract text from a file in one call.
pub fn extract_file(path: impl AsRef<Path>, locator: Option<i64>) -> Result<String> {
    Document::open(path.as_ref())?.extract(locator)
}
