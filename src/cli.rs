//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use folder_scan::config::FilterOptions;
use folder_scan::config::file::{FileConfig, expand_tilde};

/// Report file written when neither `--output` nor the config file names one.
pub const DEFAULT_OUTPUT: &str = "folder_report.txt";

/// Command-line arguments restricting which files are counted.
#[derive(Parser, Debug)]
struct FilteringArgs {
    /// Only count files with these extensions, e.g. `-e .py txt`
    ///
    /// A leading dot is added when missing and matching is case-insensitive.
    #[arg(short = 'e', long = "ext", value_name = "EXT", num_args = 1..)]
    extensions: Vec<String>,

    /// Minimum file size, e.g. 1KB, 500B, 2MB
    ///
    /// Units are binary: KB = 1024 bytes, MB = 1024 KB, and so on up to TB.
    /// A plain number is read as bytes.
    #[arg(long, value_name = "SIZE")]
    min_size: Option<String>,

    /// Maximum file size, e.g. 10MB, 1GB
    #[arg(long, value_name = "SIZE")]
    max_size: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "folder-scan")]
#[command(about = "Scan a folder and generate a summary report.")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Path to the folder to scan
    #[arg(required = true)]
    folder: Option<PathBuf>,

    /// Output report file [default: folder_report.txt]
    #[arg(short = 'o', long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the summary as a JSON document instead of the text report
    #[arg(long)]
    json: bool,

    /// Print the report without writing the report file
    #[arg(long)]
    no_save: bool,

    /// Show debug diagnostics on stderr (overridden by RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Filtering options
    #[command(flatten)]
    filtering: FilteringArgs,
}

impl Cli {
    /// The folder to scan, absent only when a subcommand was given.
    #[must_use]
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Whether the report file should be written.
    #[must_use]
    pub const fn save(&self) -> bool {
        !self.no_save
    }

    /// Resolve the report path.
    ///
    /// Priority: CLI argument > config file `output` (tilde-expanded) > `folder_report.txt`.
    #[must_use]
    pub fn output(&self, config: &FileConfig) -> PathBuf {
        self.output
            .clone()
            .or_else(|| config.output.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Resolve verbosity: the CLI flag `||` config value `||` `false`.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        self.verbose || config.verbose.unwrap_or(false)
    }

    /// Extract filtering options from CLI args and config file.
    ///
    /// Each criterion is taken from the CLI when given there, otherwise from
    /// the config file's `[filtering]` table.
    #[must_use]
    pub fn filter_options(&self, config: &FileConfig) -> FilterOptions {
        let extensions = if self.filtering.extensions.is_empty() {
            config.filtering.extensions.clone().unwrap_or_default()
        } else {
            self.filtering.extensions.clone()
        };

        FilterOptions {
            extensions,
            min_size: self
                .filtering
                .min_size
                .clone()
                .or_else(|| config.filtering.min_size.clone()),
            max_size: self
                .filtering
                .max_size
                .clone()
                .or_else(|| config.filtering.max_size.clone()),
        }
    }
}
