//! Translation mapping files.
//!
//! A mapping is the two-column `"key","text"` CSV handed to a translator.
//! It is generated from a language table with the reference-language text in
//! the second column; the translator overwrites that column and leaves the
//! keys alone.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::records::{self, LineEnding, BOM};
use crate::table::LanguageTable;

/// Ordered `key -> text` rows.
///
/// Rows keep their file order. When a key repeats, lookups see the last
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    rows: Vec<(String, String)>,
    index: HashMap<String, usize>,
    skipped: usize,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the file a translator starts from: every table key with its
    /// reference-language text.
    #[must_use]
    pub fn from_table(table: &LanguageTable) -> Self {
        let mut mapping = Self::new();
        for entry in table.entries() {
            mapping.insert(entry.key.clone(), entry.source.clone());
        }
        mapping
    }

    /// Append a row.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        self.index.insert(key.clone(), self.rows.len());
        self.rows.push((key, text.into()));
    }

    /// Read a mapping from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8, or is
    /// malformed CSV.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = records::read_text(path)?;
        let mapping = Self::parse(&text).map_err(|source| Error::csv(path, source))?;

        debug!(
            "Loaded {} translations from {} ({} short rows skipped)",
            mapping.len(),
            path.display(),
            mapping.skipped
        );
        Ok(mapping)
    }

    /// Parse a mapping from text. A leading byte-order mark is ignored and
    /// records with fewer than two fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed.
    pub fn parse(text: &str) -> csv::Result<Self> {
        let body = text.strip_prefix(BOM).unwrap_or(text);
        let parsed = records::parse_records(body, 2)?;

        let mut mapping = Self::new();
        mapping.skipped = parsed.skipped;
        for record in &parsed.records {
            if let (Some(key), Some(text)) = (record.get(0), record.get(1)) {
                mapping.insert(key, text);
            }
        }
        Ok(mapping)
    }

    /// Serialize as fully quoted `"key","text"` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded.
    pub fn to_csv(&self, line_ending: LineEnding) -> std::io::Result<Vec<u8>> {
        records::write_quoted(
            self.rows.iter().map(|(k, v)| [k.as_str(), v.as_str()]),
            line_ending,
        )
    }

    /// Write the mapping to disk.
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

    /// Translated text for `key` (last occurrence wins).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .and_then(|&i| self.rows.get(i))
            .map(|(_, text)| text.as_str())
    }

    /// Whether the mapping has a row for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Distinct keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(move |key| seen.insert(*key))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the mapping has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows, duplicates included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of records dropped while parsing for having fewer than two fields.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Entry;

    fn sample_table() -> LanguageTable {
        LanguageTable::new(
            vec!["Language\n".into(), "\n".into(), "NormalText\n".into()],
            vec![
                Entry::new("UI_Start", "Start", "开始"),
                Entry::new("UI_Quit", "Quit", "退出"),
            ],
        )
    }

    #[test]
    fn test_from_table_uses_source_column() {
        let mapping = Mapping::from_table(&sample_table());

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("UI_Start"), Some("Start"));
        assert_eq!(mapping.get("UI_Quit"), Some("Quit"));
    }

    #[test]
    fn test_to_csv_has_no_header() {
        let mapping = Mapping::from_table(&sample_table());
        let out = String::from_utf8(mapping.to_csv(LineEnding::Crlf).unwrap()).unwrap();

        assert_eq!(out, "\"UI_Start\",\"Start\"\r\n\"UI_Quit\",\"Quit\"\r\n");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let mapping = Mapping::parse("\"k\",\"first\"\n\"k\",\"second\"\n").unwrap();

        assert_eq!(mapping.get("k"), Some("second"));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.row_count(), 2);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["k"]);
    }

    #[test]
    fn test_parse_strips_bom_and_skips_short_rows() {
        let mapping = Mapping::parse("\u{feff}\"k\",\"v\"\n\"lonely\"\n").unwrap();

        assert!(mapping.contains_key("k"));
        assert!(!mapping.contains_key("lonely"));
        assert_eq!(mapping.skipped_rows(), 1);
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let mapping = Mapping::parse("k,translated,leftover\n").unwrap();
        assert_eq!(mapping.get("k"), Some("translated"));
    }

    #[test]
    fn test_parse_empty() {
        let mapping = Mapping::parse("").unwrap();
        assert!(mapping.is_empty());
        assert_eq!(mapping.get("anything"), None);
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations_to_edit.csv");
        let mut mapping = Mapping::new();
        mapping.insert("UI_Start", "Commencer, \"go\"");
        mapping.write(&path, LineEnding::Lf).unwrap();

        let read = Mapping::read(&path).unwrap();
        assert_eq!(read.get("UI_Start"), Some("Commencer, \"go\""));
    }
}
