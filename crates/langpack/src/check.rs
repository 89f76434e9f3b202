//! Pack validation.
//!
//! Catches the mistakes that make the game ignore a pack or silently fall
//! back to its default text: a wrong file name, duplicated keys, and keys
//! that were edited or dropped during translation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::pack::PackName;
use crate::table::LanguageTable;

/// Findings for one pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// The pack that was checked.
    pub pack: PathBuf,
    /// Whether the file name follows the `#GF_<name>.csv` convention.
    pub name_valid: bool,
    /// Why the name was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_error: Option<String>,
    /// Data rows in the pack.
    pub entries: usize,
    /// Keys that appear more than once, in order of first repeat.
    pub duplicate_keys: Vec<String>,
    /// Entries with a blank translation.
    pub untranslated: usize,
    /// Whether the pack was compared against a source table.
    pub source_checked: bool,
    /// Source keys the pack lacks.
    pub missing_keys: Vec<String>,
    /// Pack keys the source lacks.
    pub unknown_keys: Vec<String>,
}

impl CheckReport {
    /// Whether the pack passed every check.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.name_valid
            && self.duplicate_keys.is_empty()
            && self.missing_keys.is_empty()
            && self.unknown_keys.is_empty()
    }
}

/// Check a pack, optionally against the source table it was built from.
///
/// # Errors
///
/// Returns [`Error::PackNotFound`] or [`Error::SourceNotFound`] for missing
/// inputs, or an error if either file cannot be read.
pub fn check_pack(
    pack_path: impl AsRef<Path>,
    source: Option<&Path>,
    table_config: &TableConfig,
) -> Result<CheckReport> {
    let pack_path = pack_path.as_ref();
    if !pack_path.exists() {
        return Err(Error::PackNotFound {
            path: pack_path.to_path_buf(),
        });
    }

    let mut report = CheckReport {
        pack: pack_path.to_path_buf(),
        ..CheckReport::default()
    };

    match PackName::from_path(pack_path) {
        Ok(_) => report.name_valid = true,
        Err(e) => report.name_error = Some(e.to_string()),
    }

    let table = LanguageTable::read(pack_path, table_config.header_lines)?;
    report.entries = table.len();
    report.duplicate_keys = duplicate_keys(&table);
    report.untranslated = table
        .entries()
        .iter()
        .filter(|e| e.target.trim().is_empty())
        .count();

    if let Some(source) = source {
        if !source.exists() {
            return Err(Error::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        let source_table = LanguageTable::read(source, table_config.header_lines)?;
        report.source_checked = true;
        report.missing_keys = difference(&source_table, &table);
        report.unknown_keys = difference(&table, &source_table);
    }

    debug!(
        "Checked {}: {}",
        pack_path.display(),
        if report.is_ok() { "ok" } else { "problems found" }
    );
    Ok(report)
}

fn duplicate_keys(table: &LanguageTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for key in table.keys() {
        if !seen.insert(key) && reported.insert(key) {
            duplicates.push(key.to_string());
        }
    }
    duplicates
}

/// Distinct keys of `left` that are absent from `right`, in `left` order.
fn difference(left: &LanguageTable, right: &LanguageTable) -> Vec<String> {
    let right: HashSet<&str> = right.keys().collect();
    let mut seen = HashSet::new();
    left.keys()
        .filter(|key| !right.contains(key) && seen.insert(*key))
        .map(str::to_string)
        .collect()
}
