//! Shared CSV record plumbing for language tables and mapping files.
//!
//! Both file kinds are read leniently (short records are skipped, not
//! rejected) and written with every field quoted.

use std::fs;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// UTF-8 byte-order mark, as inserted by spreadsheet editors.
pub(crate) const BOM: char = '\u{feff}';

/// Record terminator used when writing CSV data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n`, as the game ships its tables.
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    fn terminator(self) -> Terminator {
        match self {
            Self::Crlf => Terminator::CRLF,
            Self::Lf => Terminator::Any(b'\n'),
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crlf => write!(f, "crlf"),
            Self::Lf => write!(f, "lf"),
        }
    }
}

/// Records parsed from a CSV body.
#[derive(Debug, Default)]
pub(crate) struct ParsedRecords {
    /// Records with at least the requested number of fields.
    pub records: Vec<StringRecord>,
    /// Number of records dropped for having too few fields.
    pub skipped: usize,
}

/// Parse `body` as header-less CSV, keeping records with at least `min_fields` fields.
pub(crate) fn parse_records(body: &str, min_fields: usize) -> csv::Result<ParsedRecords> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut parsed = ParsedRecords::default();
    for result in reader.records() {
        let record = result?;
        if record.len() < min_fields {
            trace!(fields = record.len(), line = ?record.position().map(csv::Position::line), "Skipping short record");
            parsed.skipped += 1;
            continue;
        }
        parsed.records.push(record);
    }
    Ok(parsed)
}

/// Serialize rows as fully quoted CSV.
pub(crate) fn write_quoted<'a, I, R>(rows: I, line_ending: LineEnding) -> std::io::Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .terminator(line_ending.terminator())
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

/// Read a UTF-8 text file.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::file_read(path, source))
}

/// Write `contents` to `path`, creating parent directories if needed.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    debug!("Writing {} bytes to {}", contents.len(), path.display());
    fs::write(path, contents).map_err(|source| Error::file_write(path, source))
}
