//! Error types for langpack.
//!
//! This module defines all error types used throughout the langpack crate,
//! carrying the offending path wherever a file is involved so messages point
//! the user at the file to fix.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for langpack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// The source language table does not exist.
    #[error("source file not found: {}", path.display())]
    SourceNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The translation mapping file does not exist.
    #[error("mapping file not found: {}", path.display())]
    MappingNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The language extension pack to check or install does not exist.
    #[error("pack file not found: {}", path.display())]
    PackNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Failed to read a file (including invalid UTF-8).
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be parsed or written.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        /// Path of the file being processed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    // === Pack Errors ===
    /// A file name does not follow the language extension pack convention.
    #[error("invalid pack name '{name}': {reason}")]
    InvalidPackName {
        /// The rejected file name.
        name: String,
        /// Which rule was broken.
        reason: String,
    },

    /// No language folder was given on the command line or in the configuration.
    #[error("no language folder configured; pass --language-dir or set game.language_dir")]
    LanguageDirUnset,

    /// The language folder does not exist.
    #[error("language folder does not exist: {}", path.display())]
    LanguageDirMissing {
        /// Path of the expected folder.
        path: PathBuf,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for langpack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid pack name error.
    #[must_use]
    pub fn invalid_pack_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPackName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a file read error for the given path.
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a file write error for the given path.
    #[must_use]
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV error for the given path.
    #[must_use]
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means an input file was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::MappingNotFound { .. } | Self::PackNotFound { .. }
        )
    }
}
