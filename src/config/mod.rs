//! Configuration types for scanning and reporting.
//!
//! - [`filter`] - What a scan keeps ([`ScanFilter`]) and the raw options it is built from
//! - [`file`] - Persistent defaults loaded from `config.toml`

pub mod file;
pub mod filter;

pub use file::FileConfig;
pub use filter::{FilterOptions, ScanFilter, normalize_filter_extension};
