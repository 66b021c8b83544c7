//! Domain types for describing extraction inputs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// The format of a source document.
///
/// Serializes as its lowercase extension (`"pdf"`, `"docx"`, `"pptx"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Word (Office Open XML) flow document.
    Docx,
    /// PowerPoint (Office Open XML) presentation.
    Pptx,
}

impl DocumentFormat {
    /// Detect format from a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Resolve the declared format of a file name from its suffix.
    ///
    /// A name without an extension is reported as-is in the error.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(name);

        Self::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat(ext.to_lowercase()))
    }

    /// Canonical lowercase extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
        }
    }

    /// Whether extraction can be narrowed to one page or slide.
    pub fn supports_locator(&self) -> bool {
        matches!(self, Self::Pdf | Self::Pptx)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// An input document: a file on disk or an in-memory buffer with a name.
#[derive(Debug, Clone)]
pub enum Source {
    /// A file on disk.
    Path(PathBuf),
    /// Raw bytes with the name they were uploaded or stored under.
    Bytes { name: String, data: Vec<u8> },
}

impl Source {
    /// Create a source from a path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Create a source from a name and an in-memory buffer.
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Name used for format detection and error messages.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Path(path) => path.to_string_lossy(),
            Self::Bytes { name, .. } => Cow::Borrowed(name),
        }
    }

    /// The format declared by the source's name.
    pub fn declared_format(&self) -> Result<DocumentFormat> {
        DocumentFormat::from_name(&self.name())
    }

    /// Check that the source declares `expected` and, for files, that it exists.
    ///
    /// The name is checked before the file system is touched. No file
    /// content is read.
    pub fn validate(&self, expected: DocumentFormat) -> Result<()> {
        let declared = self.declared_format()?;
        if declared != expected {
            return Err(Error::FormatMismatch { expected, declared });
        }

        if let Self::Path(path) = self {
            if !path.exists() {
                return Err(Error::NotFound { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Read the full contents of the source.
    pub fn read(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Path(path) => match std::fs::read(path) {
                Ok(data) => Ok(Cow::Owned(data)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(Error::NotFound { path: path.clone() })
                }
                Err(e) => Err(Error::Io(e)),
            },
            Self::Bytes { data, .. } => Ok(Cow::Borrowed(data)),
        }
    }
}
