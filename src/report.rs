//! Summary statistics and text report rendering.
//!
//! [`Summary::from_scan`] aggregates a [`ScanResult`]; [`render_report`]
//! lays the summary out, together with the scanned folder, a timestamp and
//! the active filter, in the fixed "Folder Scan Report" text format.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;

use crate::{
    config::ScanFilter,
    record::{FileRecord, ScanResult},
    utils::{format_bytes, size::format_scaled},
};

/// Name shown as the largest file when nothing was found.
pub const NO_LARGEST_FILE: &str = "N/A";

/// Timestamp layout used in the `Date` line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column width of the extension in the breakdown section.
const EXTENSION_COLUMN: usize = 20;

/// Aggregate figures over one scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Number of records
    pub total_files: usize,

    /// Sum of record sizes in bytes
    pub total_size: u64,

    /// Biggest record (first one on a tie), `None` for an empty scan
    pub largest: Option<FileRecord>,

    /// Extensions with their counts, highest count first
    pub breakdown: Vec<(String, usize)>,
}

impl Summary {
    /// Compute the summary of a scan.
    #[must_use]
    pub fn from_scan(result: &ScanResult) -> Self {
        Self {
            total_files: result.len(),
            total_size: result.total_size(),
            largest: result.largest().cloned(),
            breakdown: result
                .tally
                .most_common()
                .into_iter()
                .map(|(ext, count)| (ext.to_string(), count))
                .collect(),
        }
    }

    /// Name and size of the largest file, or `("N/A", 0)` when empty.
    #[must_use]
    pub fn largest_file(&self) -> (&str, u64) {
        self.largest
            .as_ref()
            .map_or((NO_LARGEST_FILE, 0), |record| (record.name.as_str(), record.size))
    }
}

/// A rendered text report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the text report for one scan.
///
/// `folder` is shown as an absolute path. `filter` is echoed back so the
/// reader knows which files were considered. Lines are joined with `\n`
/// and the report carries no trailing newline.
#[must_use]
pub fn render_report(
    folder: &Path,
    summary: &Summary,
    filter: &ScanFilter,
    generated_at: &NaiveDateTime,
) -> Report {
    let (largest_name, largest_size) = summary.largest_file();

    let mut lines = vec![
        "Folder Scan Report".to_string(),
        "==================".to_string(),
        format!("Scanned folder : {}", absolute_folder(folder).display()),
        format!("Date           : {}", generated_at.format(DATE_FORMAT)),
        format!("Filter (ext)   : {}", describe_extension_filter(filter)),
        format!("Filter (size)  : {}", describe_size_filter(filter)),
        String::new(),
        format!("Total files    : {}", summary.total_files),
        format!("Total size     : {}", format_bytes(summary.total_size)),
        format!(
            "Largest file   : {largest_name} ({})",
            format_bytes(largest_size)
        ),
        String::new(),
        "File Types Breakdown".to_string(),
        "--------------------".to_string(),
    ];

    lines.extend(
        summary
            .breakdown
            .iter()
            .map(|(ext, count)| format!("  {ext:<EXTENSION_COLUMN$} {count} file(s)")),
    );

    Report(lines.join("\n"))
}

/// The folder as an absolute path, without resolving symlinks.
#[must_use]
pub fn absolute_folder(folder: &Path) -> PathBuf {
    std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf())
}

/// `".md, .txt"` for an extension filter, `"None (all files)"` without one.
#[must_use]
pub fn describe_extension_filter(filter: &ScanFilter) -> String {
    filter.extensions().map_or_else(
        || "None (all files)".to_string(),
        |allowed| allowed.iter().map(String::as_str).collect::<Vec<_>>().join(", "),
    )
}

/// `">= X and <= Y"` (or either half) for size bounds, `"None"` without any.
#[must_use]
pub fn describe_size_filter(filter: &ScanFilter) -> String {
    let parts: Vec<String> = [
        filter.min_size().map(|min| format!(">= {}", format_scaled(min))),
        filter.max_size().map(|max| format!("<= {}", format_scaled(max))),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" and ")
    }
}
