//! Language extension pack naming and installation.
//!
//! The game only offers a CSV as an extra language when its file name is
//! `#GF_<name>.csv` and it sits in the game's `language` folder.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Literal, case-sensitive prefix the game looks for.
pub const PACK_PREFIX: &str = "#GF_";

/// Required file extension (compared case-insensitively).
pub const PACK_EXTENSION: &str = "csv";

/// Name of the folder the game loads packs from.
pub const LANGUAGE_DIR_NAME: &str = "language";

static PACK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#GF_([^/\\]+)\.(?i:csv)$").expect("pack name pattern is valid")
});

/// A validated pack file name such as `#GF_custom.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct PackName {
    file_name: String,
    stem_len: usize,
}

impl PackName {
    /// Validate a bare file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPackName`] naming the first rule the name breaks.
    pub fn parse(file_name: &str) -> Result<Self> {
        if let Some(caps) = PACK_NAME.captures(file_name) {
            let stem_len = caps.get(1).map_or(0, |m| m.len());
            return Ok(Self {
                file_name: file_name.to_string(),
                stem_len,
            });
        }

        let reason = if file_name.contains(['/', '\\']) {
            "must be a file name, not a path".to_string()
        } else if !file_name.starts_with(PACK_PREFIX) {
            if file_name.to_ascii_uppercase().starts_with(PACK_PREFIX) {
                format!("prefix '{PACK_PREFIX}' is case-sensitive")
            } else {
                format!("missing '{PACK_PREFIX}' prefix")
            }
        } else if !has_csv_extension(file_name) {
            format!("extension must be '.{PACK_EXTENSION}'")
        } else {
            format!("name between '{PACK_PREFIX}' and '.{PACK_EXTENSION}' is empty")
        };
        Err(Error::invalid_pack_name(file_name, reason))
    }

    /// Validate the file name component of a path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPackName`] if the path has no UTF-8 file name
    /// or the name breaks the convention.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::invalid_pack_name(path.display().to_string(), "path has no file name")
            })?;
        Self::parse(file_name)
    }

    /// Build the pack name for a language called `name`, e.g. `custom` gives `#GF_custom.csv`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPackName`] if `name` is empty or contains a path separator.
    pub fn for_name(name: &str) -> Result<Self> {
        Self::parse(&format!("{PACK_PREFIX}{name}.{PACK_EXTENSION}"))
    }

    /// The part between the prefix and the extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.file_name[PACK_PREFIX.len()..PACK_PREFIX.len() + self.stem_len]
    }

    /// The full file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for PackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

impl From<PackName> for String {
    fn from(name: PackName) -> Self {
        name.file_name
    }
}

fn has_csv_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PACK_EXTENSION))
}

/// Whether `path` names a file the game would load as a pack.
#[must_use]
pub fn is_pack_file(path: impl AsRef<Path>) -> bool {
    PackName::from_path(path).is_ok()
}

/// Installation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    /// Keep a timestamped copy of a pack that is about to be overwritten.
    pub backup: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// What [`install`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// The pack was copied into an empty slot.
    Installed,
    /// An identical pack was already installed; nothing was written.
    Unchanged,
    /// A different pack with the same name was overwritten.
    Replaced {
        /// Where the previous file was moved, if backups were enabled.
        backup: Option<PathBuf>,
    },
}

/// Result of installing a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// The validated pack name.
    pub pack: PackName,
    /// Final location inside the language folder.
    pub destination: PathBuf,
    /// What happened.
    pub outcome: InstallOutcome,
    /// Whether the target folder is named `language`, the only folder the
    /// game loads packs from.
    pub language_dir_name_valid: bool,
}

/// Copy a pack into the game's language folder.
///
/// A target folder not named [`LANGUAGE_DIR_NAME`] is still used, but the
/// mismatch is logged and reported, since the game will not see the pack.
///
/// # Errors
///
/// Returns an error if the pack name is invalid, the pack or the language
/// folder does not exist, or any file operation fails.
pub fn install(
    pack_path: impl AsRef<Path>,
    language_dir: impl AsRef<Path>,
    options: InstallOptions,
) -> Result<InstallReport> {
    let pack_path = pack_path.as_ref();
    let language_dir = language_dir.as_ref();

    let pack = PackName::from_path(pack_path)?;
    if !pack_path.is_file() {
        return Err(Error::PackNotFound {
            path: pack_path.to_path_buf(),
        });
    }
    if !language_dir.is_dir() {
        return Err(Error::LanguageDirMissing {
            path: language_dir.to_path_buf(),
        });
    }

    let language_dir_name_valid = is_language_dir(language_dir);
    if !language_dir_name_valid {
        warn!(
            "{} is not a '{LANGUAGE_DIR_NAME}' folder; the game only loads packs from its '{LANGUAGE_DIR_NAME}' folder",
            language_dir.display()
        );
    }

    let contents = fs::read(pack_path).map_err(|source| Error::file_read(pack_path, source))?;
    let destination = language_dir.join(pack.file_name());

    let outcome = if destination.exists() {
        let existing =
            fs::read(&destination).map_err(|source| Error::file_read(&destination, source))?;
        if blake3::hash(&existing) == blake3::hash(&contents) {
            debug!("{} is already installed and unchanged", destination.display());
            InstallOutcome::Unchanged
        } else {
            let backup = if options.backup {
                let backup = backup_path(&destination);
                back_up(&destination, &backup)?;
                Some(backup)
            } else {
                None
            };
            InstallOutcome::Replaced { backup }
        }
    } else {
        InstallOutcome::Installed
    };

    if outcome != InstallOutcome::Unchanged {
        fs::write(&destination, &contents)
            .map_err(|source| Error::file_write(&destination, source))?;
        debug!("Installed {} to {}", pack, destination.display());
    }

    Ok(InstallReport {
        pack,
        destination,
        outcome,
        language_dir_name_valid,
    })
}

/// Whether `dir` is named like the game's language folder.
#[must_use]
pub fn is_language_dir(dir: impl AsRef<Path>) -> bool {
    dir.as_ref()
        .file_name()
        .is_some_and(|name| name == LANGUAGE_DIR_NAME)
}

/// Copy the installed pack aside. The original stays in place until the new
/// contents are written over it.
fn back_up(destination: &Path, backup: &Path) -> Result<()> {
    fs::copy(destination, backup).map_err(|source| Error::file_write(backup, source))?;
    debug!("Backed up previous pack to {}", backup.display());
    Ok(())
}

/// `<file>.<UTC timestamp>.bak` next to `path`.
fn backup_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{stamp}.bak"));
    path.with_file_name(name)
}
