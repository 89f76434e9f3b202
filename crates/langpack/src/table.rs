//! Language tables: the game's three-column localization CSV.
//!
//! A table starts with a fixed number of raw header lines (in the shipped
//! files: `Language`, a blank line and `NormalText`) followed by CSV records
//! of the form `key, source text, translated text`. Header lines are kept
//! byte-for-byte and never run through the CSV parser.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::records::{self, LineEnding, BOM};

/// Number of raw header lines in the game's language tables.
pub const DEFAULT_HEADER_LINES: usize = 3;

/// One localized string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Identifier the game looks strings up by. Must never be edited.
    pub key: String,
    /// Text in the reference language.
    pub source: String,
    /// Text in the target language.
    pub target: String,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(key: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A parsed language table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    header: Vec<String>,
    entries: Vec<Entry>,
    skipped: usize,
}

impl LanguageTable {
    /// Build a table from already-split parts.
    #[must_use]
    pub fn new(header: Vec<String>, entries: Vec<Entry>) -> Self {
        Self {
            header,
            entries,
            skipped: 0,
        }
    }

    /// Read a table from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8, or its CSV
    /// body is malformed.
    pub fn read(path: impl AsRef<Path>, header_lines: usize) -> Result<Self> {
        let path = path.as_ref();
        let text = records::read_text(path)?;
        let table = Self::parse(&text, header_lines).map_err(|source| Error::csv(path, source))?;

        debug!(
            "Read {} entries from {} ({} header lines, {} short rows skipped)",
            table.entries.len(),
            path.display(),
            table.header.len(),
            table.skipped
        );
        Ok(table)
    }

    /// Parse a table from text.
    ///
    /// The first `header_lines` lines (terminators included) become the raw
    /// header. Every following record with at least three fields becomes an
    /// entry; extra fields are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV body is malformed.
    pub fn parse(text: &str, header_lines: usize) -> csv::Result<Self> {
        let mut header = Vec::with_capacity(header_lines);
        let mut offset = 0;
        for line in text.split_inclusive('\n').take(header_lines) {
            header.push(line.to_string());
            offset += line.len();
        }

        let mut body = &text[offset..];
        if header.is_empty() {
            body = body.strip_prefix(BOM).unwrap_or(body);
        }

        let parsed = records::parse_records(body, 3)?;
        let entries = parsed
            .records
            .iter()
            .filter_map(|record| match (record.get(0), record.get(1), record.get(2)) {
                (Some(key), Some(source), Some(target)) => Some(Entry::new(key, source, target)),
                _ => None,
            })
            .collect();

        Ok(Self {
            header,
            entries,
            skipped: parsed.skipped,
        })
    }

    /// Serialize the table: raw header lines, then fully quoted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded.
    pub fn to_csv(&self, line_ending: LineEnding) -> std::io::Result<Vec<u8>> {
        let rows = records::write_quoted(
            self.entries
                .iter()
                .map(|e| [e.key.as_str(), e.source.as_str(), e.target.as_str()]),
            line_ending,
        )?;

        let header_len: usize = self.header.iter().map(String::len).sum();
        let mut out = Vec::with_capacity(header_len + rows.len());
        for line in &self.header {
            out.extend_from_slice(line.as_bytes());
        }
        out.extend_from_slice(&rows);
        Ok(out)
    }

    /// Write the table to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: impl AsRef<Path>, line_ending: LineEnding) -> Result<()> {
        let path = path.as_ref();
        let bytes = self
            .to_csv(line_ending)
            .map_err(|source| Error::file_write(path, source))?;
        records::write_file(path, &bytes)
    }

    /// The raw header lines.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Mutable access to the entries. Keys should be left untouched.
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    /// Keys in file order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// First entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records dropped while parsing for having fewer than three fields.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }
}
