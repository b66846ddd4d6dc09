//! # folder-scan
//!
//! Library behind the `folder-scan` command: scan the immediate contents of
//! one directory and summarize them as a fixed-layout text report (file
//! count, total size, largest file, breakdown by extension).
//!
//! The pipeline runs in one direction:
//!
//! 1. [`utils::parse_size`] turns `--min-size`/`--max-size` strings into byte thresholds
//! 2. [`scanner::Scanner`] enumerates the directory and applies a [`config::ScanFilter`]
//! 3. [`report::Summary`] aggregates the [`record::ScanResult`]
//! 4. [`report::render_report`] lays it out using [`utils::format_size`]

pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod report;
pub mod scanner;
pub mod utils;

pub use config::{FilterOptions, ScanFilter};
pub use error::{ScanError, SizeError};
pub use record::{ExtensionTally, FileRecord, ScanResult};
pub use report::{Report, Summary, render_report};
pub use scanner::Scanner;
