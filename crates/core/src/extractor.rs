//! The capability shared by every format extractor.

use crate::error::{Error, Result};
use crate::types::{DocumentFormat, Source};

/// Extracts plain text from one document format.
///
/// `locator` is an optional 1-based page or slide number. Extractors for
/// formats without sub-document addressing reject any locator with
/// [`Error::UnsupportedLocator`]. Implementations hold no state across
/// calls; every call reads and releases its own input.
pub trait TextExtractor: Send + Sync {
    /// The format this extractor handles.
    fn format(&self) -> DocumentFormat;

    /// Extract the whole document, or the single page/slide named by `locator`.
    fn extract(&self, source: &Source, locator: Option<i64>) -> Result<String>;

    /// Whether `extract` accepts a locator.
    fn supports_locator(&self) -> bool {
        self.format().supports_locator()
    }

    /// Reject a locator when this extractor cannot honor it.
    fn check_locator(&self, locator: Option<i64>) -> Result<()> {
        if locator.is_some() && !self.supports_locator() {
            return Err(Error::UnsupportedLocator(self.format()));
        }
        Ok(())
    }
}
