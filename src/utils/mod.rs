//! Utility functions and helpers.
//!
//! This module contains the size parsing and formatting helpers shared by the
//! scanner, the report builder and the command-line front end.

pub mod size;

pub use size::{format_bytes, format_size, parse_size};
