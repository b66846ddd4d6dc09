//! Per-extension occurrence counting.

use std::collections::BTreeMap;

/// Tally key for files whose name carries no extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// Occurrence count per normalized extension.
///
/// Keys are kept in lexicographic order, which makes
/// [`ExtensionTally::most_common`] deterministic for equal counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionTally(BTreeMap<String, usize>);

impl ExtensionTally {
    /// Count one more file with the given extension.
    pub fn increment(&mut self, extension: &str) {
        *self.0.entry(extension.to_string()).or_insert(0) += 1;
    }

    /// Number of files seen with `extension` (zero if never seen).
    #[must_use]
    pub fn get(&self, extension: &str) -> usize {
        self.0.get(extension).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of distinct extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(ext, count)| (ext.as_str(), *count))
    }

    /// Entries sorted by count, highest first.
    ///
    /// Equal counts stay in key order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<'a> FromIterator<&'a str> for ExtensionTally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Self::default();
        for extension in iter {
            tally.increment(extension);
        }
        tally
    }
}
