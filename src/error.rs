//! Error types for size handling and directory scanning.
//!
//! The library reports failures through these typed enums; the binary wraps
//! them in `anyhow` and turns them into an `Error: ...` line plus exit code 1.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing or formatting sizes.
#[derive(Error, Debug, PartialEq)]
pub enum SizeError {
    /// The size string is neither `<number><unit>` nor a bare number,
    /// or it describes a negative amount.
    #[error("Invalid size format '{0}'. Use e.g. 10KB, 5MB, 1GB.")]
    InvalidSizeFormat(String),

    /// A negative (or non-finite) byte count reached the formatter.
    #[error("Invalid byte count: {0} (must be a non-negative number)")]
    InvalidInput(f64),
}

/// Errors raised when the scan target cannot be enumerated.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Nothing exists at the given path.
    #[error("'{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// The path exists but is not a directory.
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),

    /// The directory itself could not be read.
    #[error("Failed to read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
