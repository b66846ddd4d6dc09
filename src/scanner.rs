//! Directory scanning and file collection.
//!
//! This module provides the scanning logic that enumerates the immediate
//! entries of one directory, keeps the regular files that pass a
//! [`ScanFilter`], and tallies their extensions. Subdirectories are never
//! entered and symbolic links are never followed.

use std::{fs, io, path::Path};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::ScanFilter,
    error::ScanError,
    record::{FileRecord, ScanResult, normalize_extension},
};

/// Single-directory scanner.
///
/// The `Scanner` holds the filter to apply and produces one [`ScanResult`]
/// per call to [`Scanner::scan_directory`].
#[derive(Debug, Default)]
pub struct Scanner {
    /// Criteria each regular file has to meet
    filter: ScanFilter,
}

impl Scanner {
    /// Create a new scanner applying `filter`.
    #[must_use]
    pub const fn new(filter: ScanFilter) -> Self {
        Self { filter }
    }

    /// The filter this scanner applies.
    #[must_use]
    pub const fn filter(&self) -> &ScanFilter {
        &self.filter
    }

    /// Scan the immediate entries of `root`.
    ///
    /// For every regular file (symbolic links excluded, even when they point
    /// at a file) the normalized extension is checked against the filter
    /// first, then the size. Files passing both are recorded with their
    /// on-disk name and counted in the tally. Entries whose metadata cannot
    /// be read are skipped and counted in [`ScanResult::skipped`].
    ///
    /// # Errors
    ///
    /// - [`ScanError::PathNotFound`] if nothing exists at `root`
    /// - [`ScanError::NotADirectory`] if `root` is not a directory
    /// - [`ScanError::Io`] if the directory itself cannot be read
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use folder_scan::{config::ScanFilter, scanner::Scanner};
    /// let scanner = Scanner::new(ScanFilter::new().with_extensions(["rs"]));
    /// let result = scanner.scan_directory(Path::new("src"))?;
    /// println!("Found {} files", result.len());
    /// # Ok::<(), folder_scan::error::ScanError>(())
    /// ```
    pub fn scan_directory(&self, root: &Path) -> Result<ScanResult, ScanError> {
        Self::check_root(root)?;

        let mut result = ScanResult::default();

        let entries = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ScanError::Io {
                        path: root.to_path_buf(),
                        source: err.into(),
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry in {}: {err}", root.display());
                    result.skipped += 1;
                    continue;
                }
            };

            self.visit_entry(&entry, &mut result);
        }

        debug!(
            "Scanned {}: {} files kept, {} skipped",
            root.display(),
            result.len(),
            result.skipped
        );

        Ok(result)
    }

    /// Validate that `root` is an existing directory.
    fn check_root(root: &Path) -> Result<(), ScanError> {
        let metadata = fs::metadata(root).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ScanError::PathNotFound(root.to_path_buf()),
            _ => ScanError::Io {
                path: root.to_path_buf(),
                source: err,
            },
        })?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(ScanError::NotADirectory(root.to_path_buf()))
        }
    }

    /// Apply the filter to one directory entry and record it if it passes.
    fn visit_entry(&self, entry: &DirEntry, result: &mut ScanResult) {
        // Not following links, so a symlink reports its own type here.
        if !entry.file_type().is_file() {
            return;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let extension = normalize_extension(&name);

        if !self.filter.allows_extension(&extension) {
            debug!("Excluded {name}: extension {extension} not selected");
            return;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                warn!("Skipping {}: {err}", entry.path().display());
                result.skipped += 1;
                return;
            }
        };

        if !self.filter.allows_size(size) {
            debug!("Excluded {name}: {size} bytes outside size bounds");
            return;
        }

        result.push(FileRecord::new(name, size), &extension);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, len: usize) {
        fs::write(dir.join(name), vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = Scanner::default().scan_directory(&missing).unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(p) if p == missing));
    }

    #[test]
    fn test_scan_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "plain.txt", 3);

        let err = Scanner::default()
            .scan_directory(&temp.path().join("plain.txt"))
            .unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp = TempDir::new().unwrap();

        let result = Scanner::default().scan_directory(temp.path()).unwrap();
        assert!(result.is_empty());
        assert!(result.tally.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "top.txt", 10);
        fs::create_dir(temp.path().join("nested")).unwrap();
        write_file(&temp.path().join("nested"), "deep.txt", 10);

        let result = Scanner::default().scan_directory(temp.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].name, "top.txt");
    }

    #[test]
    fn test_scan_keeps_original_case() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "README.MD", 4);

        let result = Scanner::default().scan_directory(temp.path()).unwrap();

        assert_eq!(result.records[0].name, "README.MD");
        assert_eq!(result.tally.get(".md"), 1);
    }

    #[test]
    fn test_extension_filter_skips_tally_too() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "a.txt", 100);
        write_file(temp.path(), "b.md", 2000);

        let scanner = Scanner::new(ScanFilter::new().with_extensions([".txt"]));
        let result = scanner.scan_directory(temp.path()).unwrap();

        assert_eq!(result.records, vec![FileRecord::new("a.txt", 100)]);
        assert_eq!(result.tally.get(".md"), 0);
        assert_eq!(result.tally.total(), 1);
    }

    #[test]
    fn test_min_size_filter() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "a.txt", 100);
        write_file(temp.path(), "b.md", 2000);

        let scanner = Scanner::new(ScanFilter::new().with_min_size(500.0).unwrap());
        let result = scanner.scan_directory(temp.path()).unwrap();

        assert_eq!(result.records, vec![FileRecord::new("b.md", 2000)]);
    }

    #[test]
    fn test_max_size_filter() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "a.txt", 100);
        write_file(temp.path(), "b.md", 2000);

        let scanner = Scanner::new(ScanFilter::new().with_max_size(100.0).unwrap());
        let result = scanner.scan_directory(temp.path()).unwrap();

        assert_eq!(result.records, vec![FileRecord::new("a.txt", 100)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_file_is_excluded() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "target.txt", 50);
        std::os::unix::fs::symlink(temp.path().join("target.txt"), temp.path().join("link.txt"))
            .unwrap();

        let result = Scanner::default().scan_directory(temp.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].name, "target.txt");
    }
}
