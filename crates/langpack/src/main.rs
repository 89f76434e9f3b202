//! `langpack` - CLI for building language extension packs
//!
//! This binary walks a translator through the three steps: create a mapping
//! file, build a pack from the edited mapping, and install the pack.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use langpack::cli::{
    BuildCommand, CheckCommand, Cli, Command, ConfigCommand, CreateCommand, InstallCommand,
};
use langpack::{init_logging, CheckReport, Config, InstallOptions, InstallOutcome};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Create(cmd) => handle_create(&config, cmd),
        Command::Build(cmd) => handle_build(&config, cmd),
        Command::Check(cmd) => handle_check(&config, &cmd),
        Command::Install(cmd) => handle_install(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_create(config: &Config, cmd: CreateCommand) -> anyhow::Result<ExitCode> {
    let output = cmd
        .output
        .unwrap_or_else(|| config.files.mapping_file.clone());
    let report = langpack::create_mapping_file(&cmd.source, &output, &config.table)?;

    if cmd.json {
        print_json(&report)?;
    } else {
        println!("Created mapping file: {}", report.output.display());
        println!(
            "  Extracted {} entries (skipped {} header lines)",
            report.entries, report.header_lines
        );
        println!();
        println!(
            "Next step: edit {} and replace column 2 with your translations",
            report.output.display()
        );
        println!("  Change rows from: \"key\",\"original_text\"");
        println!("  To:               \"key\",\"new_text\"");
        println!("  Do not change the keys.");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_build(config: &Config, cmd: BuildCommand) -> anyhow::Result<ExitCode> {
    let output = cmd.output.unwrap_or_else(|| config.files.pack_file.clone());
    let report = langpack::build_pack_file(&cmd.source, &cmd.mapping, &output, &config.table)?;

    if cmd.json {
        print_json(&report)?;
    } else {
        println!("Created translation file: {}", report.output.display());
        println!("  Preserved {} header lines (raw copy)", report.header_lines);
        println!("  Updated {} translations", report.updated);
        println!("  Total data rows: {}", report.total_rows);
        if !report.unknown_keys.is_empty() {
            println!(
                "  {} mapping keys were not found in the source:",
                report.unknown_keys.len()
            );
            for key in &report.unknown_keys {
                println!("    {key}");
            }
        }
        if !report.pack_name_valid {
            println!();
            println!("Rename the file to '#GF_<name>.csv' so the game recognizes it.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_check(config: &Config, cmd: &CheckCommand) -> anyhow::Result<ExitCode> {
    let report = langpack::check_pack(&cmd.pack, cmd.source.as_deref(), &config.table)?;

    if cmd.json {
        print_json(&report)?;
    } else {
        print_check_report(&report);
    }

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_check_report(report: &CheckReport) {
    println!("Checked {}", report.pack.display());
    match &report.name_error {
        None => println!("  Name:           ok"),
        Some(reason) => println!("  Name:           {reason}"),
    }
    println!("  Entries:        {}", report.entries);
    println!("  Untranslated:   {}", report.untranslated);
    print_keys("Duplicate keys", &report.duplicate_keys);
    if report.source_checked {
        print_keys("Missing keys", &report.missing_keys);
        print_keys("Unknown keys", &report.unknown_keys);
    }
    println!();
    println!("{}", if report.is_ok() { "OK" } else { "Problems found." });
}

fn print_keys(label: &str, keys: &[String]) {
    println!("  {:<15} {}", format!("{label}:"), keys.len());
    for key in keys {
        println!("    {key}");
    }
}

fn handle_install(config: &Config, cmd: &InstallCommand) -> anyhow::Result<ExitCode> {
    let language_dir = config.language_dir(cmd.language_dir.as_deref())?;
    let options = InstallOptions {
        backup: !cmd.no_backup,
    };
    let report = langpack::install(&cmd.pack, language_dir, options)?;

    if cmd.json {
        print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }

    match &report.outcome {
        InstallOutcome::Installed => {
            println!("Installed {} to {}", report.pack, report.destination.display());
        }
        InstallOutcome::Unchanged => {
            println!("{} is already installed and up to date", report.pack);
            return Ok(ExitCode::SUCCESS);
        }
        InstallOutcome::Replaced { backup } => {
            println!("Replaced {}", report.destination.display());
            if let Some(backup) = backup {
                println!("  Previous version saved as {}", backup.display());
            }
        }
    }
    if !report.language_dir_name_valid {
        println!(
            "Warning: {} is not the game's 'language' folder; the game will not find the pack there.",
            language_dir.display()
        );
    }
    println!("Restart the game to load the new language.");
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Table]");
                println!("  Header lines:       {}", config.table.header_lines);
                println!("  Line ending:        {}", config.table.line_ending);
                println!();
                println!("[Files]");
                println!(
                    "  Mapping file:       {}",
                    config.files.mapping_file.display()
                );
                println!("  Pack file:          {}", config.files.pack_file.display());
                println!();
                println!("[Game]");
                match &config.game.language_dir {
                    Some(dir) => println!("  Language folder:    {}", dir.display()),
                    None => println!("  Language folder:    (not set)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
