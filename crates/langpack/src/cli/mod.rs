//! Command-line interface for langpack.
//!
//! This module provides the CLI structure for the `langpack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{BuildCommand, CheckCommand, ConfigCommand, CreateCommand, InstallCommand};

/// langpack - Build language extension packs
///
/// Turns a game's language table into an editable mapping file, folds your
/// translations back in, and installs the result as a `#GF_<name>.csv` pack.
#[derive(Debug, Parser)]
#[command(name = "langpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Step 1: create a mapping file ("key","text") to translate
    Create(CreateCommand),

    /// Step 2: build a pack from the source table and your edited mapping
    Build(BuildCommand),

    /// Check a pack's name and keys
    Check(CheckCommand),

    /// Step 3: copy a pack into the game's language folder
    Install(InstallCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "langpack");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_create_default_output() {
        let cli = Cli::try_parse_from(["langpack", "create", "#GF_hypocritical.csv"]).unwrap();
        let Command::Create(cmd) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(cmd.source, PathBuf::from("#GF_hypocritical.csv"));
        assert!(cmd.output.is_none());
    }

    #[test]
    fn test_parse_build_with_output() {
        let cli = Cli::try_parse_from([
            "langpack",
            "build",
            "#GF_hypocritical.csv",
            "my_translations.csv",
            "-o",
            "#GF_custom.csv",
        ])
        .unwrap();
        let Command::Build(cmd) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(cmd.mapping, PathBuf::from("my_translations.csv"));
        assert_eq!(cmd.output, Some(PathBuf::from("#GF_custom.csv")));
    }

    #[test]
    fn test_parse_build_requires_mapping() {
        assert!(Cli::try_parse_from(["langpack", "build", "#GF_hypocritical.csv"]).is_err());
    }

    #[test]
    fn test_parse_check_with_source() {
        let cli = Cli::try_parse_from([
            "langpack",
            "check",
            "#GF_custom.csv",
            "--source",
            "#GF_hypocritical.csv",
            "--json",
        ])
        .unwrap();
        let Command::Check(cmd) = cli.command else {
            panic!("expected check");
        };
        assert!(cmd.json);
        assert_eq!(cmd.source, Some(PathBuf::from("#GF_hypocritical.csv")));
    }

    #[test]
    fn test_parse_install() {
        let cli = Cli::try_parse_from([
            "langpack",
            "install",
            "#GF_custom.csv",
            "-l",
            "/games/gf/language",
            "--no-backup",
        ])
        .unwrap();
        let Command::Install(cmd) = cli.command else {
            panic!("expected install");
        };
        assert!(cmd.no_backup);
        assert_eq!(cmd.language_dir, Some(PathBuf::from("/games/gf/language")));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["langpack", "config", "show", "-c", "/custom/config.toml", "-vv"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["langpack", "-q", "config", "path"]).unwrap();
        assert!(cli.quiet);
    }
}
