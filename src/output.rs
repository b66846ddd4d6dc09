//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, a [`JsonReport`] is serialized to
//! stdout as a single JSON object instead of the human-readable report.

use serde::Serialize;

use crate::{
    config::ScanFilter,
    report::Summary,
    utils::format_bytes,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonReport {
    /// Absolute path of the scanned folder.
    pub folder: String,

    /// Local time of the scan, `YYYY-MM-DD HH:MM:SS`.
    pub generated_at: String,

    /// Filter that was applied.
    pub filter: JsonFilter,

    /// Number of files that matched.
    pub total_files: usize,

    /// Combined size of the matched files in bytes.
    pub total_size: u64,

    /// Human-readable total size (e.g. `"4.77 MiB"`).
    pub total_size_formatted: String,

    /// Largest matched file, `null` when nothing matched.
    pub largest_file: Option<JsonFileEntry>,

    /// Extension counts, highest count first.
    pub breakdown: Vec<JsonExtensionEntry>,

    /// Entries skipped because their metadata could not be read.
    pub skipped: usize,
}

/// Filter criteria echoed back in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonFilter {
    /// Allowed extensions, `null` for all files.
    pub extensions: Option<Vec<String>>,

    /// Minimum size in bytes, if any.
    pub min_size: Option<f64>,

    /// Maximum size in bytes, if any.
    pub max_size: Option<f64>,
}

/// A single file in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonFileEntry {
    pub name: String,
    pub size: u64,
    pub size_formatted: String,
}

/// One line of the extension breakdown.
#[derive(Serialize, Debug)]
pub struct JsonExtensionEntry {
    pub extension: String,
    pub count: usize,
}

impl JsonReport {
    /// Build the JSON document for a summarized scan.
    #[must_use]
    pub fn new(
        folder: String,
        generated_at: String,
        summary: &Summary,
        filter: &ScanFilter,
        skipped: usize,
    ) -> Self {
        Self {
            folder,
            generated_at,
            filter: JsonFilter::from_filter(filter),
            total_files: summary.total_files,
            total_size: summary.total_size,
            total_size_formatted: format_bytes(summary.total_size),
            largest_file: summary.largest.as_ref().map(|record| JsonFileEntry {
                name: record.name.clone(),
                size: record.size,
                size_formatted: format_bytes(record.size),
            }),
            breakdown: summary
                .breakdown
                .iter()
                .map(|(extension, count)| JsonExtensionEntry {
                    extension: extension.clone(),
                    count: *count,
                })
                .collect(),
            skipped,
        }
    }
}

impl JsonFilter {
    #[must_use]
    pub fn from_filter(filter: &ScanFilter) -> Self {
        Self {
            extensions: filter
                .extensions()
                .map(|allowed| allowed.iter().cloned().collect()),
            min_size: filter.min_size(),
            max_size: filter.max_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FileRecord, ScanResult};

    fn sample_summary() -> Summary {
        let mut result = ScanResult::default();
        result.push(FileRecord::new("a.txt", 100), ".txt");
        result.push(FileRecord::new("b.md", 5_000_000), ".md");
        result.push(FileRecord::new("c.txt", 7), ".txt");
        Summary::from_scan(&result)
    }

    #[test]
    fn test_json_report_fields() {
        let filter = ScanFilter::new().with_extensions(["txt", "md"]);
        let report = JsonReport::new(
            "/data".to_string(),
            "2024-03-09 14:05:07".to_string(),
            &sample_summary(),
            &filter,
            1,
        );

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["folder"], "/data");
        assert_eq!(value["total_files"], 3);
        assert_eq!(value["total_size"], 5_000_107);
        assert_eq!(value["largest_file"]["name"], "b.md");
        assert_eq!(value["largest_file"]["size_formatted"], "4.77 MiB");
        assert_eq!(value["breakdown"][0]["extension"], ".txt");
        assert_eq!(value["breakdown"][0]["count"], 2);
        assert_eq!(value["filter"]["extensions"][0], ".md");
        assert!(value["filter"]["min_size"].is_null());
        assert_eq!(value["skipped"], 1);
    }

    #[test]
    fn test_json_report_empty_scan() {
        let summary = Summary::from_scan(&ScanResult::default());
        let report = JsonReport::new(
            "/empty".to_string(),
            "2024-03-09 14:05:07".to_string(),
            &summary,
            &ScanFilter::new(),
            0,
        );

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["total_files"], 0);
        assert_eq!(value["total_size_formatted"], "0.00 B");
        assert!(value["largest_file"].is_null());
        assert!(value["filter"]["extensions"].is_null());
        assert_eq!(value["breakdown"].as_array().map(Vec::len), Some(0));
    }
}
