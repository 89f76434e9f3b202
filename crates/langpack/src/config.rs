//! Configuration management for langpack.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pack::PackName;
use crate::records::LineEnding;
use crate::table::DEFAULT_HEADER_LINES;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "langpack";

/// Environment variable prefix. Nested keys use `__`, e.g.
/// `LANGPACK_GAME__LANGUAGE_DIR`.
const ENV_PREFIX: &str = "LANGPACK_";

/// Upper bound for `table.header_lines`.
const MAX_HEADER_LINES: usize = 64;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LANGPACK_`)
/// 2. TOML config file at `~/.config/langpack/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language table layout.
    pub table: TableConfig,
    /// Default file names.
    pub files: FilesConfig,
    /// Game installation.
    pub game: GameConfig,
}

/// Layout of the game's language tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Number of raw lines at the top of a table copied verbatim.
    pub header_lines: usize,
    /// Record terminator for rows written by langpack.
    pub line_ending: LineEnding,
}

/// Default output file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Where `create` writes the mapping when `--output` is not given.
    pub mapping_file: PathBuf,
    /// Where `build` writes the pack when `--output` is not given.
    pub pack_file: PathBuf,
}

/// Game installation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The game's `language` folder, used by `install`.
    pub language_dir: Option<PathBuf>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            line_ending: LineEnding::Crlf,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            mapping_file: PathBuf::from("translations_to_edit.csv"),
            pack_file: PathBuf::from("#GF_custom.csv"),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A config file that does not exist is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.table.header_lines > MAX_HEADER_LINES {
            return Err(Error::ConfigValidation {
                message: format!(
                    "table.header_lines ({}) cannot be greater than {MAX_HEADER_LINES}",
                    self.table.header_lines
                ),
            });
        }

        if self.files.mapping_file.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "files.mapping_file cannot be empty".to_string(),
            });
        }

        if let Err(e) = PackName::from_path(&self.files.pack_file) {
            return Err(Error::ConfigValidation {
                message: format!("files.pack_file: {e}"),
            });
        }

        Ok(())
    }

    /// Resolve the language folder, preferring an explicit override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LanguageDirUnset`] if neither the override nor
    /// `game.language_dir` is set.
    pub fn language_dir<'a>(&'a self, override_dir: Option<&'a Path>) -> Result<&'a Path> {
        override_dir
            .or(self.game.language_dir.as_deref())
            .ok_or(Error::LanguageDirUnset)
    }
}
