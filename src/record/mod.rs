//! Scan output data structures.
//!
//! This module contains the types produced by one directory scan and consumed
//! by the report builder.
//!
//! ## Main Parts
//!
//! - [`FileRecord`] - Name and size of one qualifying file
//! - [`ExtensionTally`] - Occurrence count per normalized extension
//! - [`ScanResult`] - Records plus tally for a single scan
//! - [`normalize_extension`] - The extension key used for tallying and filtering

pub mod tally;

pub use tally::{ExtensionTally, NO_EXTENSION};

/// A regular file that passed every filter of a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    /// File name as it appears on disk (case preserved)
    pub name: String,

    /// Size of the file in bytes
    pub size: u64,
}

impl FileRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Everything one call to [`crate::scanner::Scanner::scan_directory`] found.
///
/// `records` keeps filesystem enumeration order. Every record has been
/// counted exactly once in `tally`, so the tally total always equals
/// `records.len()`.
#[derive(Clone, Debug, Default)]
pub struct ScanResult {
    /// Qualifying files in enumeration order
    pub records: Vec<FileRecord>,

    /// Extension counts over `records`
    pub tally: ExtensionTally,

    /// Entries dropped because their metadata could not be read
    pub skipped: usize,
}

impl ScanResult {
    /// Record a qualifying file under its normalized extension.
    pub fn push(&mut self, record: FileRecord, extension: &str) {
        self.tally.increment(extension);
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record sizes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.records
            .iter()
            .fold(0_u64, |total, record| total.saturating_add(record.size))
    }

    /// The biggest record; the earliest one wins a tie.
    #[must_use]
    pub fn largest(&self) -> Option<&FileRecord> {
        self.records
            .iter()
            .fold(None, |best: Option<&FileRecord>, record| match best {
                Some(current) if current.size >= record.size => Some(current),
                _ => Some(record),
            })
    }
}

/// Compute the normalized extension of a file name.
///
/// The extension is everything from the last dot, lower-cased and including
/// the dot. Leading dots do not count, so hidden files such as `.bashrc`
/// have no extension. Names without one map to [`NO_EXTENSION`].
///
/// # Examples
///
/// ```
/// # use folder_scan::record::normalize_extension;
/// assert_eq!(normalize_extension("Report.PDF"), ".pdf");
/// assert_eq!(normalize_extension("archive.tar.gz"), ".gz");
/// assert_eq!(normalize_extension("Makefile"), "(no extension)");
/// ```
#[must_use]
pub fn normalize_extension(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();

    file_name[stem_start..]
        .rfind('.')
        .map_or_else(
            || NO_EXTENSION.to_string(),
            |dot| file_name[stem_start + dot..].to_lowercase(),
        )
}
