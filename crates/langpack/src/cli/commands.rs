//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Create command arguments.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Source language table (e.g. `#GF_hypocritical.csv`)
    pub source: PathBuf,

    /// Mapping file to write [default: files.mapping_file]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Build command arguments.
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Source language table the mapping was created from
    pub source: PathBuf,

    /// Mapping file with your translations
    pub mapping: PathBuf,

    /// Pack file to write [default: files.pack_file]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Pack file to check
    pub pack: PathBuf,

    /// Compare keys against this source language table
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Install command arguments.
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Pack file to install
    pub pack: PathBuf,

    /// The game's language folder [default: game.language_dir]
    #[arg(short, long, value_name = "DIR")]
    pub language_dir: Option<PathBuf>,

    /// Overwrite an existing pack without keeping a backup
    #[arg(long)]
    pub no_backup: bool,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
