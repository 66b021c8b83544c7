//! Read-only view of a ZIP package.

use doctext_core::{Error, Result};
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Largest entry, in decompressed bytes, that will be read into memory.
pub const MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// A ZIP package opened for named-entry reads.
///
/// Only the central directory is read when the package is opened; each
/// entry is decompressed when [`Package::read_text`] asks for it.
pub struct Package<R> {
    archive: ZipArchive<R>,
    names: Vec<String>,
    source_name: String,
}

impl<'a> Package<Cursor<&'a [u8]>> {
    /// Open a package held in memory.
    pub fn from_bytes(data: &'a [u8], source_name: &str) -> Result<Self> {
        Self::open(Cursor::new(data), source_name)
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from a seekable reader.
    ///
    /// `source_name` only labels errors.
    pub fn open(reader: R, source_name: &str) -> Result<Self> {
        let corrupt = |reason: String| Error::CorruptArchive {
            source_name: source_name.to_string(),
            reason,
        };

        let mut archive = ZipArchive::new(reader).map_err(|e| corrupt(e.to_string()))?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i).map_err(|e| corrupt(e.to_string()))?;
            names.push(entry.name().to_string());
        }

        log::debug!("Opened package '{}' with {} entries", source_name, names.len());

        Ok(Self {
            archive,
            names,
            source_name: source_name.to_string(),
        })
    }

    /// Entry names in the order the archive stores them.
    pub fn list_entries(&self) -> &[String] {
        &self.names
    }

    /// Name of the source this package was opened from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Decompress one entry and decode it as UTF-8 text.
    ///
    /// A leading byte-order mark is dropped.
    pub fn read_text(&mut self, name: &str) -> Result<String> {
        let mut entry = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::EntryNotFound(name.to_string()),
            other => Error::CorruptArchive {
                source_name: self.source_name.clone(),
                reason: format!("entry '{}': {}", name, other),
            },
        })?;

        let corrupt = |reason: String| Error::CorruptArchive {
            source_name: self.source_name.clone(),
            reason,
        };

        // The declared size comes from the archive and is not trusted for allocation.
        let declared = entry.size();
        if declared > MAX_ENTRY_SIZE {
            return Err(corrupt(format!(
                "entry '{}' declares {} bytes, limit is {}",
                name, declared, MAX_ENTRY_SIZE
            )));
        }

        let mut bytes = Vec::new();
        (&mut entry)
            .take(MAX_ENTRY_SIZE + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| corrupt(format!("failed to decompress '{}': {}", name, e)))?;

        if bytes.len() as u64 != declared {
            return Err(corrupt(format!(
                "entry '{}' declares {} bytes but holds {}",
                name,
                declared,
                bytes.len()
            )));
        }

        let text = String::from_utf8(bytes).map_err(|e| Error::DecodeError {
            entry: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}
