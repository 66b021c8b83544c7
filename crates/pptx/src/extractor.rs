//! PPTX text extractor.

use crate::package::Package;
use crate::slides::{SlideIndex, SlideLayout, SlidePart};
use crate::walker::slide_text;
use doctext_core::{resolve, DocumentFormat, Error, Result, Scope, Source, TextExtractor};
use std::io::{Read, Seek};

/// Text extractor for PPTX (Office Open XML) presentations.
///
/// Without a locator, every slide is extracted in slide-number order and
/// the results are joined by newlines, each prefixed with `Slide N: `.
/// With a locator, only that slide's text is returned, unprefixed.
#[derive(Debug, Clone)]
pub struct PptxExtractor {
    layout: SlideLayout,
    slide_labels: bool,
}

impl Default for PptxExtractor {
    fn default() -> Self {
        Self {
            layout: SlideLayout::default(),
            slide_labels: true,
        }
    }
}

impl PptxExtractor {
    /// Create a new PPTX extractor for the standard slide layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom slide part naming convention.
    pub fn with_layout(mut self, layout: SlideLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Toggle the `Slide N: ` prefix in whole-presentation output.
    pub fn with_slide_labels(mut self, labels: bool) -> Self {
        self.slide_labels = labels;
        self
    }

    /// Extract text from an already opened package.
    pub fn extract_package<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        locator: Option<i64>,
    ) -> Result<String> {
        let index = SlideIndex::enumerate(package, &self.layout)?;

        match resolve(locator, index.len())? {
            Scope::Single(position) => {
                let part = index.get(position).ok_or(Error::LocatorOutOfRange {
                    requested: locator.unwrap_or_default(),
                    available: index.len(),
                })?;
                self.extract_slide(package, part)
            }
            Scope::All => {
                let mut slides = Vec::with_capacity(index.len());
                for (position, part) in index.iter().enumerate() {
                    let text = self.extract_slide(package, part)?;
                    slides.push(if self.slide_labels {
                        format!("Slide {}: {}", position + 1, text)
                    } else {
                        text
                    });
                }
                Ok(slides.join("\n"))
            }
        }
    }

    fn extract_slide<R: Read + Seek>(&self, package: &mut Package<R>, part: &SlidePart) -> Result<String> {
        let xml = package.read_text(&part.entry)?;
        let text = slide_text(&xml, &part.entry)?;
        log::debug!(
            "Extracted {} bytes of text from '{}'",
            text.len(),
            part.entry
        );
        Ok(text)
    }
}

impl TextExtractor for PptxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pptx
    }

    fn extract(&self, source: &Source, locator: Option<i64>) -> Result<String> {
        source.validate(DocumentFormat::Pptx)?;

        let data = source.read()?;
        let mut package = Package::from_bytes(&data, &source.name())?;
        self.extract_package(&mut package, locator)
    }
}
