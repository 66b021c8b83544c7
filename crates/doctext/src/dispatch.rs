//! Selection of an extractor from a document's declared format.

use doctext_core::{DocumentFormat, Result, Source, TextExtractor};
use doctext_docx::DocxExtractor;
use doctext_pdf::PdfExtractor;
use doctext_pptx::PptxExtractor;

/// One of the supported format extractors.
#[derive(Debug, Clone)]
pub enum Extractor {
    Pdf(PdfExtractor),
    Docx(DocxExtractor),
    Pptx(PptxExtractor),
}

impl Extractor {
    /// The default extractor for a format.
    pub fn for_format(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Pdf => Self::Pdf(PdfExtractor::new()),
            DocumentFormat::Docx => Self::Docx(DocxExtractor::new()),
            DocumentFormat::Pptx => Self::Pptx(PptxExtractor::new()),
        }
    }

    /// Resolve the extractor for a file name, ignoring the case of its suffix.
    ///
    /// Unknown suffixes fail with `UnsupportedFormat` without touching the file.
    pub fn for_name(name: &str) -> Result<Self> {
        let format = DocumentFormat::from_name(name)?;
        log::debug!("Resolved '{}' as {}", name, format);
        Ok(Self::for_format(format))
    }
}

impl TextExtractor for Extractor {
    fn format(&self) -> DocumentFormat {
        match self {
            Self::Pdf(e) => e.format(),
            Self::Docx(e) => e.format(),
            Self::Pptx(e) => e.format(),
        }
    }

    fn extract(&self, source: &Source, locator: Option<i64>) -> Result<String> {
        self.check_locator(locator)?;

        match self {
            Self::Pdf(e) => e.extract(source, locator),
            Self::Docx(e) => e.extract(source, locator),
            Self::Pptx(e) => e.extract(source, locator),
        }
    }
}

impl From<PdfExtractor> for Extractor {
    fn from(extractor: PdfExtractor) -> Self {
        Self::Pdf(extractor)
    }
}

impl From<DocxExtractor> for Extractor {
    fn from(extractor: DocxExtractor) -> Self {
        Self::Docx(extractor)
    }
}

impl From<PptxExtractor> for Extractor {
    fn from(extractor: PptxExtractor) -> Self {
        Self::Pptx(extractor)
    }
}
