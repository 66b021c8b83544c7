//! Discovery and ordering of slide parts inside a package.

use crate::package::Package;
use doctext_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Read, Seek};

/// Naming convention of slide parts: `{directory}{stem}{N}{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    directory: String,
    stem: String,
    extension: String,
}

impl Default for SlideLayout {
    fn default() -> Self {
        Self {
            directory: "ppt/slides/".to_string(),
            stem: "slide".to_string(),
            extension: ".xml".to_string(),
        }
    }
}

impl SlideLayout {
    /// Create the standard PresentationML layout (`ppt/slides/slideN.xml`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different directory; a trailing `/` is added if missing.
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        let mut directory = directory.into();
        if !directory.is_empty() && !directory.ends_with('/') {
            directory.push('/');
        }
        self.directory = directory;
        self
    }

    /// Use a different file stem before the slide number.
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Use a different extension after the slide number.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Classify an entry name.
    ///
    /// Returns `Ok(None)` for entries outside the convention, the parsed slide
    /// number for slide parts, and an error for names that carry the slide
    /// prefix and extension but no usable number between them.
    pub fn parse(&self, name: &str) -> Result<Option<u32>> {
        let Some(body) = name
            .strip_prefix(self.directory.as_str())
            .and_then(|rest| rest.strip_prefix(self.stem.as_str()))
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
        else {
            return Ok(None);
        };

        let malformed = |reason: &str| Error::MalformedSlideName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if body.is_empty() {
            return Err(malformed("missing slide number"));
        }
        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("slide number is not numeric"));
        }

        body.parse::<u32>()
            .map(Some)
            .map_err(|_| malformed("slide number is too large"))
    }
}

/// One slide part: its parsed number and archive entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePart {
    pub number: u32,
    pub entry: String,
}

/// Slide parts of one package, ascending by slide number.
#[derive(Debug, Clone, Default)]
pub struct SlideIndex {
    parts: Vec<SlidePart>,
}

impl SlideIndex {
    /// Find and order the slide parts of an opened package.
    pub fn enumerate<R: Read + Seek>(package: &Package<R>, layout: &SlideLayout) -> Result<Self> {
        Self::from_names(package.list_entries(), layout)
    }

    /// Find and order slide parts among a list of entry names.
    ///
    /// Ordering is numeric (`slide9` before `slide10`). Two entries with the
    /// same number are rejected, as are names with a non-numeric body.
    pub fn from_names<S: AsRef<str>>(names: &[S], layout: &SlideLayout) -> Result<Self> {
        let mut parts = Vec::new();
        let mut seen: HashMap<u32, &str> = HashMap::new();

        for name in names {
            let name = name.as_ref();
            let Some(number) = layout.parse(name)? else {
                continue;
            };

            if let Some(first) = seen.insert(number, name) {
                return Err(Error::MalformedSlideName {
                    name: name.to_string(),
                    reason: format!("duplicates slide number {} of '{}'", number, first),
                });
            }

            parts.push(SlidePart {
                number,
                entry: name.to_string(),
            });
        }

        parts.sort_by_key(|part| part.number);

        log::debug!("Found {} slide parts", parts.len());

        Ok(Self { parts })
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the package has no slides.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The slide at a 0-based position.
    pub fn get(&self, position: usize) -> Option<&SlidePart> {
        self.parts.get(position)
    }

    /// Slides in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &SlidePart> {
        self.parts.iter()
    }
}
