//! Filtering configuration for directory scans.
//!
//! This module defines the filter a scan applies to each regular file, and
//! the raw, string-based filter options collected from the command line and
//! the configuration file before they are parsed.

use std::collections::BTreeSet;

use crate::error::SizeError;
use crate::utils::parse_size;

/// Restrictions on which directory entries a scan keeps.
///
/// Each criterion is optional; an absent criterion lets every file through.
/// A filter with a minimum size of zero is therefore different from a filter
/// without a minimum size only in how it is reported, never in what it keeps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanFilter {
    extensions: Option<BTreeSet<String>>,
    min_size: Option<f64>,
    max_size: Option<f64>,
}

impl ScanFilter {
    /// A filter that keeps every regular file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the scan to the given extensions.
    ///
    /// Each entry is normalized with [`normalize_filter_extension`]. An empty
    /// list removes the extension restriction.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = extensions
            .into_iter()
            .map(|ext| normalize_filter_extension(ext.as_ref()))
            .collect();

        self.extensions = if set.is_empty() { None } else { Some(set) };
        self
    }

    /// Drop files smaller than `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::InvalidInput`] if `bytes` is negative or not finite.
    pub fn with_min_size(mut self, bytes: f64) -> Result<Self, SizeError> {
        self.min_size = Some(validate_threshold(bytes)?);
        Ok(self)
    }

    /// Drop files larger than `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::InvalidInput`] if `bytes` is negative or not finite.
    pub fn with_max_size(mut self, bytes: f64) -> Result<Self, SizeError> {
        self.max_size = Some(validate_threshold(bytes)?);
        Ok(self)
    }

    /// Allowed extensions, if restricted.
    #[must_use]
    pub const fn extensions(&self) -> Option<&BTreeSet<String>> {
        self.extensions.as_ref()
    }

    #[must_use]
    pub const fn min_size(&self) -> Option<f64> {
        self.min_size
    }

    #[must_use]
    pub const fn max_size(&self) -> Option<f64> {
        self.max_size
    }

    /// Whether a file with this normalized extension may be kept.
    #[must_use]
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.extensions
            .as_ref()
            .is_none_or(|allowed| allowed.contains(extension))
    }

    /// Whether a file of this size lies within the size bounds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn allows_size(&self, size: u64) -> bool {
        let size = size as f64;

        self.min_size.is_none_or(|min| size >= min) && self.max_size.is_none_or(|max| size <= max)
    }

    /// Whether any size bound is set.
    #[must_use]
    pub const fn has_size_bounds(&self) -> bool {
        self.min_size.is_some() || self.max_size.is_some()
    }
}

/// Normalize a user-supplied extension for filtering.
///
/// The result is lower-cased and starts with a dot, so `"TXT"`, `"txt"` and
/// `".txt"` all become `".txt"`.
#[must_use]
pub fn normalize_filter_extension(extension: &str) -> String {
    let extension = extension.trim().to_lowercase();

    if extension.starts_with('.') {
        extension
    } else {
        format!(".{extension}")
    }
}

fn validate_threshold(bytes: f64) -> Result<f64, SizeError> {
    if bytes.is_finite() && bytes >= 0.0 {
        Ok(bytes.abs())
    } else {
        Err(SizeError::InvalidInput(bytes))
    }
}

/// Raw filtering criteria as collected from the CLI and config file.
///
/// Size bounds are still human-readable strings here; [`FilterOptions::to_scan_filter`]
/// parses them.
#[derive(Clone, Debug, Default)]
pub struct FilterOptions {
    /// Extensions to keep (empty = all files)
    pub extensions: Vec<String>,

    /// Minimum file size (e.g. `"1KB"`)
    pub min_size: Option<String>,

    /// Maximum file size (e.g. `"10MB"`)
    pub max_size: Option<String>,
}

impl FilterOptions {
    /// Parse the raw options into a [`ScanFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::InvalidSizeFormat`] if either size string cannot
    /// be parsed.
    pub fn to_scan_filter(&self) -> Result<ScanFilter, SizeError> {
        let mut filter = ScanFilter::new().with_extensions(&self.extensions);

        if let Some(min) = &self.min_size {
            filter = filter.with_min_size(parse_size(min)?)?;
        }
        if let Some(max) = &self.max_size {
            filter = filter.with_max_size(parse_size(max)?)?;
        }

        Ok(filter)
    }
}
