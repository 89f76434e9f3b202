//! The two-step translation workflow.
//!
//! `create` extracts a mapping file for the translator; `build` folds the
//! edited mapping back into the source table and writes a pack.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::mapping::Mapping;
use crate::pack::{self, PACK_PREFIX};
use crate::table::LanguageTable;

/// Summary of a `create` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReport {
    /// Source table read.
    pub source: PathBuf,
    /// Mapping file written.
    pub output: PathBuf,
    /// Rows written to the mapping.
    pub entries: usize,
    /// Header lines left out of the mapping.
    pub header_lines: usize,
}

/// Summary of a `build` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Source table read.
    pub source: PathBuf,
    /// Mapping file read.
    pub mapping: PathBuf,
    /// Pack written.
    pub output: PathBuf,
    /// Header lines copied verbatim.
    pub header_lines: usize,
    /// Entries whose translation came from the mapping.
    pub updated: usize,
    /// Data rows written.
    pub total_rows: usize,
    /// Mapping keys the source does not contain, usually edited by mistake.
    pub unknown_keys: Vec<String>,
    /// Whether the output name will be picked up by the game.
    pub pack_name_valid: bool,
}

/// Write the mapping file a translator edits.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] if `source` does not exist, or an error
/// if reading or writing fails.
pub fn create_mapping_file(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    table_config: &TableConfig,
) -> Result<CreateReport> {
    let source = source.as_ref();
    let output = output.as_ref();
    ensure_exists(source, |path| Error::SourceNotFound { path })?;

    let table = LanguageTable::read(source, table_config.header_lines)?;
    let mapping = Mapping::from_table(&table);
    mapping.write(output, table_config.line_ending)?;

    debug!(
        "Created mapping file {} with {} entries",
        output.display(),
        mapping.row_count()
    );

    Ok(CreateReport {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        entries: mapping.row_count(),
        header_lines: table.header().len(),
    })
}

/// Replace each entry's translation with the mapping's text where the key
/// matches. Keys and source text are left untouched.
///
/// Returns the number of entries updated.
pub fn apply_mapping(table: &mut LanguageTable, mapping: &Mapping) -> usize {
    let mut updated = 0;
    for entry in table.entries_mut() {
        if let Some(text) = mapping.get(&entry.key) {
            entry.target = text.to_string();
            updated += 1;
        }
    }
    updated
}

/// Mapping keys that do not appear in `table`, in mapping order.
#[must_use]
pub fn unknown_keys(table: &LanguageTable, mapping: &Mapping) -> Vec<String> {
    let known: HashSet<&str> = table.keys().collect();
    mapping
        .keys()
        .filter(|key| !known.contains(key))
        .map(str::to_string)
        .collect()
}

/// Build a pack from the source table and an edited mapping.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] or [`Error::MappingNotFound`] for
/// missing inputs, or an error if reading or writing fails.
pub fn build_pack_file(
    source: impl AsRef<Path>,
    mapping_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    table_config: &TableConfig,
) -> Result<BuildReport> {
    let source = source.as_ref();
    let mapping_path = mapping_path.as_ref();
    let output = output.as_ref();
    ensure_exists(source, |path| Error::SourceNotFound { path })?;
    ensure_exists(mapping_path, |path| Error::MappingNotFound { path })?;

    let mapping = Mapping::read(mapping_path)?;

    let mut table = LanguageTable::read(source, table_config.header_lines)?;
    let updated = apply_mapping(&mut table, &mapping);

    let unknown = unknown_keys(&table, &mapping);
    if !unknown.is_empty() {
        warn!(
            count = unknown.len(),
            "Mapping has keys that are not in the source; keys must not be edited"
        );
        for key in &unknown {
            debug!(key = %key, "Unknown mapping key");
        }
    }

    let pack_name_valid = pack::is_pack_file(output);
    if !pack_name_valid {
        warn!(
            "{} is not named '{PACK_PREFIX}<name>.csv'; the game will not load it until renamed",
            output.display()
        );
    }

    table.write(output, table_config.line_ending)?;
    debug!(
        "Created translation file {} ({} of {} rows updated)",
        output.display(),
        updated,
        table.len()
    );

    Ok(BuildReport {
        source: source.to_path_buf(),
        mapping: mapping_path.to_path_buf(),
        output: output.to_path_buf(),
        header_lines: table.header().len(),
        updated,
        total_rows: table.len(),
        unknown_keys: unknown,
        pack_name_valid,
    })
}

fn ensure_exists(path: &Path, missing: impl FnOnce(PathBuf) -> Error) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(missing(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::LineEnding;
    use crate::table::Entry;

    const SOURCE: &str = "Language,English,简体中文\r\n\r\nNormalText\r\n\
\"UI_Start\",\"Start\",\"开始\"\r\n\
\"UI_Quit\",\"Quit\",\"退出\"\r\n\
\"UI_Back\",\"Back\",\"返回\"\r\n";

    fn write_source(dir: &Path) -> PathBuf {
        let path = dir.join("#GF_hypocritical.csv");
        std::fs::write(&path, SOURCE).unwrap();
        path
    }

    #[test]
    fn test_create_mapping_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path());
        let output = dir.path().join("translations_to_edit.csv");

        let report = create_mapping_file(&source, &output, &TableConfig::default()).unwrap();

        assert_eq!(report.entries, 3);
        assert_eq!(report.header_lines, 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "\"UI_Start\",\"Start\"\r\n\"UI_Quit\",\"Quit\"\r\n\"UI_Back\",\"Back\"\r\n"
        );
    }

    #[test]
    fn test_create_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_mapping_file(
            dir.path().join("missing.csv"),
            dir.path().join("out.csv"),
            &TableConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::SourceNotFound { .. }));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_apply_mapping_falls_back_to_original() {
        let mut table = LanguageTable::new(
            Vec::new(),
            vec![Entry::new("a", "A", "old a"), Entry::new("b", "B", "old b")],
        );
        let mut mapping = Mapping::new();
        mapping.insert("a", "new a");

        let updated = apply_mapping(&mut table, &mapping);

        assert_eq!(updated, 1);
        assert_eq!(table.entries()[0], Entry::new("a", "A", "new a"));
        assert_eq!(table.entries()[1], Entry::new("b", "B", "old b"));
    }

    #[test]
    fn test_unknown_keys() {
        let table = LanguageTable::new(Vec::new(), vec![Entry::new("a", "A", "")]);
        let mut mapping = Mapping::new();
        mapping.insert("a", "x");
        mapping.insert("a_typo", "y");

        assert_eq!(unknown_keys(&table, &mapping), ["a_typo"]);
    }

    #[test]
    fn test_build_pack_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path());
        let mapping = dir.path().join("mine.csv");
        std::fs::write(
            &mapping,
            "\"UI_Start\",\"Commencer\"\r\n\"UI_Quit\",\"Quitter, \"\"vite\"\"\"\r\n\"UI_Stray\",\"?\"\r\n",
        )
        .unwrap();
        let output = dir.path().join("#GF_french.csv");

        let report =
            build_pack_file(&source, &mapping, &output, &TableConfig::default()).unwrap();

        assert_eq!(report.header_lines, 3);
        assert_eq!(report.updated, 2);
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.unknown_keys, ["UI_Stray"]);
        assert!(report.pack_name_valid);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Language,English,简体中文\r\n\r\nNormalText\r\n\
\"UI_Start\",\"Start\",\"Commencer\"\r\n\
\"UI_Quit\",\"Quit\",\"Quitter, \"\"vite\"\"\"\r\n\
\"UI_Back\",\"Back\",\"返回\"\r\n"
        );
    }

    #[test]
    fn test_build_with_lf_and_unusual_output_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path());
        let mapping = dir.path().join("mine.csv");
        std::fs::write(&mapping, "UI_Back,Retour\n").unwrap();
        let output = dir.path().join("out/custom.csv");
        let config = TableConfig {
            line_ending: LineEnding::Lf,
            ..TableConfig::default()
        };

        let report = build_pack_file(&source, &mapping, &output, &config).unwrap();

        assert!(!report.pack_name_valid);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Language,English,简体中文\r\n\r\nNormalText\r\n"));
        assert!(written.ends_with("\"UI_Back\",\"Back\",\"Retour\"\n"));
    }

    #[test]
    fn test_build_missing_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path());

        let err = build_pack_file(
            &source,
            dir.path().join("nope.csv"),
            dir.path().join("#GF_x.csv"),
            &TableConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::MappingNotFound { .. }));
    }

    #[test]
    fn test_build_missing_source_checked_first() {
        let dir = tempfile::tempdir().unwrap();

        let err = build_pack_file(
            dir.path().join("a.csv"),
            dir.path().join("b.csv"),
            dir.path().join("#GF_x.csv"),
            &TableConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::SourceNotFound { .. }));
    }
}
