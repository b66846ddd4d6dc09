//! # folder-scan
//!
//! A small CLI tool that scans the immediate contents of one folder and writes
//! a summary report: file count, total size, largest file, and a breakdown of
//! file extensions.
//!
//! ## Features
//!
//! - Non-recursive scan; symbolic links are never followed
//! - Extension and size filters (binary units: 1KB = 1024 bytes)
//! - Plain-text report printed and saved to a file, or JSON output
//! - Persistent defaults via `~/.config/folder-scan/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Scan a folder and write folder_report.txt
//! folder-scan ~/Downloads
//!
//! # Only Python and text files between 1KB and 10MB
//! folder-scan ~/Projects -e .py txt --min-size 1KB --max-size 10MB -o report.txt
//! ```

mod cli;

use std::{fs, path::Path, process::exit};

use anyhow::{Ok, Result, bail};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::Colorize;
use folder_scan::{
    Report, ScanFilter, Scanner, Summary,
    config::FileConfig,
    output::JsonReport,
    report::{DATE_FORMAT, absolute_folder, render_report},
    utils::{format_size, parse_size},
};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommand, DEFAULT_OUTPUT};

/// Entry point for the folder-scan application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, builds the filter, scans the folder, then prints the
/// report and saves it.
///
/// # Errors
///
/// Returns errors for an invalid target folder, an unparsable size filter,
/// or a report file that cannot be written.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);
    init_tracing(args.verbose(&file_config));

    let Some(folder) = args.folder() else {
        bail!("A folder to scan is required");
    };

    let filter = args.filter_options(&file_config).to_scan_filter()?;
    let scanner = Scanner::new(filter);
    let result = scanner.scan_directory(folder)?;

    if result.skipped > 0 && !json_mode {
        eprintln!(
            "{}",
            format!(
                "Warning: skipped {} entries whose metadata could not be read",
                result.skipped
            )
            .yellow()
        );
    }

    let summary = Summary::from_scan(&result);
    let generated_at = Local::now().naive_local();

    if result.is_empty() {
        return print_empty_result(
            json_mode,
            folder,
            &summary,
            scanner.filter(),
            &generated_at,
            result.skipped,
        );
    }

    let report = render_report(folder, &summary, scanner.filter(), &generated_at);

    if json_mode {
        let output = json_report(
            folder,
            &summary,
            scanner.filter(),
            &generated_at,
            result.skipped,
        );
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{report}");
    }

    if args.save() {
        let output_path = args.output(&file_config);
        write_report(&output_path, &report)?;

        if !json_mode {
            println!(
                "\n{} {}",
                "Report saved to:".green(),
                absolute_folder(&output_path).display()
            );
        }
    }

    Ok(())
}

// ── Helper functions ────────────────────────────────────────────────────

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output from this crate with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "folder_scan=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Emit the empty-scan result. No report file is written.
fn print_empty_result(
    json_mode: bool,
    folder: &Path,
    summary: &Summary,
    filter: &ScanFilter,
    generated_at: &NaiveDateTime,
    skipped: usize,
) -> Result<()> {
    if json_mode {
        let output = json_report(folder, summary, filter, generated_at, skipped);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("No files found in '{}'.", folder.display());
    }
    Ok(())
}

/// Build the `--json` document for a scan, empty or not.
fn json_report(
    folder: &Path,
    summary: &Summary,
    filter: &ScanFilter,
    generated_at: &NaiveDateTime,
    skipped: usize,
) -> JsonReport {
    JsonReport::new(
        absolute_folder(folder).display().to_string(),
        generated_at.format(DATE_FORMAT).to_string(),
        summary,
        filter,
        skipped,
    )
}

/// Write the report followed by a newline, replacing any existing file.
fn write_report(path: &Path, report: &Report) -> Result<()> {
    fs::write(path, format!("{report}\n"))
        .map_err(|e| anyhow::anyhow!("Failed to write report file {}: {e}", path.display()))
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        std::result::Result::Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# folder-scan configuration
# All values shown are their defaults. Uncomment and change as needed.

# Report file written after each scan (relative paths resolve against the
# current directory)
# output = "folder_report.txt"

# Show debug diagnostics on stderr
# verbose = false

[filtering]
# Only count files with these extensions (dot optional, case-insensitive)
# extensions = [".py", ".txt"]

# Ignore files smaller / larger than this (B, KB, MB, GB, TB; 1KB = 1024 bytes)
# min_size = "1KB"
# max_size = "100MB"
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));

    for (key, value) in [
        ("min_size", config.filtering.min_size.as_deref()),
        ("max_size", config.filtering.max_size.as_deref()),
    ] {
        if let Some(Err(e)) = value.map(parse_size) {
            eprintln!("{} {key}: {e}", "Warning: scans will fail until you fix".yellow());
        }
    }
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_size(val: Option<&str>) -> String {
        val.map_or_else(
            || "(none)  (default)".to_string(),
            |v| match parse_size(v).and_then(format_size) {
                std::result::Result::Ok(bytes) => format!("\"{v}\"  ({bytes})"),
                Err(_) => format!("\"{v}\"  (invalid size)"),
            },
        )
    }
    fn show_list(val: Option<&[String]>) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|e| format!("\"{e}\"")).collect();
                format!("[{}]", items.join(", "))
            }
            _ => "[]  (default: all files)".to_string(),
        }
    }

    let output = config.output.as_ref().map_or_else(
        || format!("\"{DEFAULT_OUTPUT}\"  (default)"),
        |p| format!("\"{}\"", p.display()),
    );

    format!(
        "\
output     = {output}
verbose    = {verbose}

[filtering]
extensions = {extensions}
min_size   = {min_size}
max_size   = {max_size}",
        verbose = config
            .verbose
            .map_or_else(|| "false  (default)".to_string(), |v| v.to_string()),
        extensions = show_list(config.filtering.extensions.as_deref()),
        min_size = show_size(config.filtering.min_size.as_deref()),
        max_size = show_size(config.filtering.max_size.as_deref()),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}
