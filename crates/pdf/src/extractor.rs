//! PDF text extractor.

use doctext_core::{resolve, DocumentFormat, Error, Result, Scope, Source, TextExtractor};

/// Text extractor for PDF documents.
///
/// Without a locator, pages are joined in order by the page separator
/// (a blank line by default). With a locator, only that page is returned.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    page_separator: String,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self {
            page_separator: "\n\n".to_string(),
        }
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom separator between pages in whole-document output.
    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Extract text from an in-memory PDF.
    pub fn extract_bytes(&self, data: &[u8], locator: Option<i64>) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| {
            Error::ExtractionError {
                format: DocumentFormat::Pdf,
                message: e.to_string(),
            }
        })?;

        log::debug!("PDF has {} pages", pages.len());

        self.select_pages(&pages, locator)
    }

    /// Apply a locator to already extracted page texts.
    fn select_pages<S: AsRef<str>>(&self, pages: &[S], locator: Option<i64>) -> Result<String> {
        match resolve(locator, pages.len())? {
            Scope::Single(position) => Ok(pages[position].as_ref().trim().to_string()),
            Scope::All => Ok(pages
                .iter()
                .map(|page| page.as_ref().trim())
                .collect::<Vec<_>>()
                .join(&self.page_separator)),
        }
    }
}

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, source: &Source, locator: Option<i64>) -> Result<String> {
        source.validate(DocumentFormat::Pdf)?;

        let data = source.read()?;
        self.extract_bytes(&data, locator)
    }
}
