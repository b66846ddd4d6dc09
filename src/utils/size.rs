//! Size parsing and formatting utilities.
//!
//! This module converts human-readable size strings (like "10KB" or "1.5MB")
//! into byte counts, and byte counts back into display strings. Both
//! directions use binary multiples: a kilobyte here is 1024 bytes, and the
//! formatter labels its output with IEC units (KiB, MiB, ...).

use crate::error::SizeError;

/// Unit suffixes accepted by [`parse_size`], longest first so that `"TB"`
/// wins over the trailing `"B"`.
const PARSE_UNITS: &[(&str, f64)] = &[
    ("KB", 1_024.0),
    ("MB", 1_048_576.0),
    ("GB", 1_073_741_824.0),
    ("TB", 1_099_511_627_776.0),
    ("B", 1.0),
];

/// Display units stepped through by the formatter, smallest first.
const DISPLAY_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Unit used for anything that is still 1024 or more after `PiB`.
const LARGEST_DISPLAY_UNIT: &str = "EiB";

const STEP: f64 = 1024.0;

/// Parse a human-readable size string into bytes.
///
/// Surrounding whitespace is ignored and units are case-insensitive. The
/// numeric part may be an integer or a decimal, and the result is returned
/// as a floating-point byte count because fractional inputs such as
/// `"0.5KB"` are allowed.
///
/// # Supported Units
///
/// - `B` (1), `KB` (1024), `MB` (1024²), `GB` (1024³), `TB` (1024⁴)
/// - No unit: the number is taken as bytes
///
/// # Errors
///
/// Returns [`SizeError::InvalidSizeFormat`] carrying the original input when
/// the string is not a number with an optional known unit, or when the
/// resulting amount is negative or not finite.
///
/// # Examples
///
/// ```
/// # use folder_scan::utils::parse_size;
/// assert_eq!(parse_size("10KB").unwrap(), 10_240.0);
/// assert_eq!(parse_size(" 1.5 mb ").unwrap(), 1_572_864.0);
/// assert_eq!(parse_size("512").unwrap(), 512.0);
/// ```
pub fn parse_size(size_str: &str) -> Result<f64, SizeError> {
    let normalized = size_str.trim().to_uppercase();

    let bytes = parse_size_unit(&normalized)
        .and_then(|(number, multiplier)| parse_number(number).map(|n| n * multiplier))
        .or_else(|| parse_number(&normalized))
        .ok_or_else(|| SizeError::InvalidSizeFormat(size_str.to_string()))?;

    if bytes < 0.0 || !bytes.is_finite() {
        return Err(SizeError::InvalidSizeFormat(size_str.to_string()));
    }

    // abs() folds "-0" into 0
    Ok(bytes.abs())
}

/// Split a known unit suffix off an upper-cased size string.
///
/// Returns `None` when no suffix matches.
fn parse_size_unit(size_str: &str) -> Option<(&str, f64)> {
    PARSE_UNITS.iter().find_map(|(suffix, multiplier)| {
        size_str
            .strip_suffix(suffix)
            .map(|number| (number.trim(), *multiplier))
    })
}

/// Parse a finite decimal number.
fn parse_number(number_str: &str) -> Option<f64> {
    number_str
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Format a byte count as `"<value> <unit>"` with two decimal places.
///
/// The value is divided by 1024 until it drops below 1024, walking through
/// `B`, `KiB`, `MiB`, `GiB`, `TiB`, `PiB` and stopping at `EiB` no matter
/// how large the remainder is.
///
/// # Errors
///
/// Returns [`SizeError::InvalidInput`] for negative, `NaN` or infinite input.
///
/// # Examples
///
/// ```
/// # use folder_scan::utils::format_size;
/// assert_eq!(format_size(1024.0).unwrap(), "1.00 KiB");
/// assert_eq!(format_size(5_000_000.0).unwrap(), "4.77 MiB");
/// ```
pub fn format_size(size_bytes: f64) -> Result<String, SizeError> {
    if !size_bytes.is_finite() || size_bytes < 0.0 {
        return Err(SizeError::InvalidInput(size_bytes));
    }

    Ok(format_scaled(size_bytes.abs()))
}

/// Format an on-disk byte count. Infallible counterpart of [`format_size`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    format_scaled(bytes as f64)
}

/// Format a value already known to be finite and non-negative.
pub(crate) fn format_scaled(mut value: f64) -> String {
    for unit in DISPLAY_UNITS {
        if value < STEP {
            return format!("{value:.2} {unit}");
        }
        value /= STEP;
    }

    format!("{value:.2} {LARGEST_DISPLAY_UNIT}")
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    /// Turn a formatted size back into an approximate byte count.
    fn approx_bytes(formatted: &str) -> f64 {
        let (value, unit) = formatted.split_once(' ').unwrap();
        let exponent = DISPLAY_UNITS
            .iter()
            .chain(std::iter::once(&LARGEST_DISPLAY_UNIT))
            .position(|u| *u == unit)
            .unwrap();
        value.parse::<f64>().unwrap() * STEP.powi(i32::try_from(exponent).unwrap())
    }

    #[test]
    fn test_parse_size_plain_bytes() {
        assert_eq!(parse_size("0").unwrap(), 0.0);
        assert_eq!(parse_size("1000").unwrap(), 1000.0);
        assert_eq!(parse_size("12.5").unwrap(), 12.5);
    }

    #[test]
    fn test_parse_size_binary_units() {
        assert_eq!(parse_size("500B").unwrap(), 500.0);
        assert_eq!(parse_size("1KB").unwrap(), 1_024.0);
        assert_eq!(parse_size("1024KB").unwrap(), 1_048_576.0);
        assert_eq!(parse_size("5MB").unwrap(), 5_242_880.0);
        assert_eq!(parse_size("1GB").unwrap(), 1_073_741_824.0);
        assert_eq!(parse_size("2TB").unwrap(), 2_199_023_255_552.0);
    }

    #[test]
    fn test_parse_size_case_and_whitespace() {
        assert_eq!(parse_size("1kb").unwrap(), 1_024.0);
        assert_eq!(parse_size("1Mb").unwrap(), 1_048_576.0);
        assert_eq!(parse_size("  10 KB  ").unwrap(), 10_240.0);
        assert_eq!(parse_size("\t2gb\n").unwrap(), 2_147_483_648.0);
    }

    #[test]
    fn test_parse_size_decimal_values() {
        assert_eq!(parse_size("0.5KB").unwrap(), 512.0);
        assert_eq!(parse_size("1.5MB").unwrap(), 1_572_864.0);
        assert_eq!(parse_size("0.25GB").unwrap(), 268_435_456.0);
    }

    #[test]
    fn test_parse_size_unit_order() {
        // "TB" and "KB" must not be read as a number ending in "T"/"K" plus "B"
        assert_eq!(parse_size_unit("3TB"), Some(("3", 1_099_511_627_776.0)));
        assert_eq!(parse_size_unit("3KB"), Some(("3", 1_024.0)));
        assert_eq!(parse_size_unit("3B"), Some(("3", 1.0)));
        assert_eq!(parse_size_unit("3"), None);
    }

    #[test]
    fn test_parse_size_invalid_formats() {
        for input in ["abc", "", "KB", "1.2.3MB", "MB1", "1XB", "ten bytes"] {
            assert_eq!(
                parse_size(input),
                Err(SizeError::InvalidSizeFormat(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_size_rejects_negative_and_non_finite() {
        assert!(parse_size("-1").is_err());
        assert!(parse_size("-5KB").is_err());
        assert!(parse_size("inf").is_err());
        assert!(parse_size("NaN").is_err());
        assert!(parse_size("infinityKB").is_err());
    }

    #[test]
    fn test_parse_size_rejects_overflowing_amount() {
        // a finite number times the unit can still overflow
        assert_eq!(
            parse_size("9e300TB"),
            Err(SizeError::InvalidSizeFormat("9e300TB".to_string()))
        );
        assert_eq!(
            parse_size("1e308KB"),
            Err(SizeError::InvalidSizeFormat("1e308KB".to_string()))
        );
    }

    #[test]
    fn test_parse_size_negative_zero_is_zero() {
        let zero = parse_size("-0").unwrap();
        assert!(zero.is_sign_positive());
        assert_eq!(format_size(zero).unwrap(), "0.00 B");
    }

    #[test]
    fn test_format_size_small_values() {
        assert_eq!(format_size(0.0).unwrap(), "0.00 B");
        assert_eq!(format_size(1.0).unwrap(), "1.00 B");
        assert_eq!(format_size(1023.0).unwrap(), "1023.00 B");
        assert_eq!(format_size(100.5).unwrap(), "100.50 B");
    }

    #[test]
    fn test_format_size_unit_steps() {
        assert_eq!(format_size(1024.0).unwrap(), "1.00 KiB");
        assert_eq!(format_size(1536.0).unwrap(), "1.50 KiB");
        assert_eq!(format_size(5_000_000.0).unwrap(), "4.77 MiB");
        assert_eq!(format_size(1_073_741_824.0).unwrap(), "1.00 GiB");
        assert_eq!(format_size(1_099_511_627_776.0).unwrap(), "1.00 TiB");
        assert_eq!(format_size(STEP.powi(5)).unwrap(), "1.00 PiB");
        assert_eq!(format_size(STEP.powi(6)).unwrap(), "1.00 EiB");
    }

    #[test]
    fn test_format_size_caps_at_largest_unit() {
        assert_eq!(format_size(STEP.powi(7)).unwrap(), "1024.00 EiB");
        assert_eq!(format_bytes(u64::MAX), "16.00 EiB");
    }

    #[test]
    fn test_format_size_rejects_invalid_input() {
        assert_eq!(format_size(-1.0), Err(SizeError::InvalidInput(-1.0)));
        assert!(format_size(f64::NAN).is_err());
        assert!(format_size(f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_bytes_matches_format_size() {
        for bytes in [0_u64, 100, 2000, 5_000_000, 3_221_225_472] {
            #[allow(clippy::cast_precision_loss)]
            let expected = format_size(bytes as f64).unwrap();
            assert_eq!(format_bytes(bytes), expected);
        }
    }

    #[test]
    fn test_format_size_is_monotonic() {
        let mut samples: Vec<u64> = Vec::new();
        for exponent in 0..6 {
            let base = 1024_u64.pow(exponent);
            samples.extend([base - 1, base, base + 1, base * 512, base * 1023, base * 1024 - 1]);
        }
        samples.sort_unstable();
        samples.dedup();

        for pair in samples.windows(2) {
            let smaller = approx_bytes(&format_bytes(pair[0]));
            let larger = approx_bytes(&format_bytes(pair[1]));
            assert!(
                smaller <= larger,
                "{} formatted above {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_parse_then_format_uses_same_basis() {
        assert_eq!(format_size(parse_size("1KB").unwrap()).unwrap(), "1.00 KiB");
        assert_eq!(format_size(parse_size("5MB").unwrap()).unwrap(), "5.00 MiB");
        assert_eq!(format_size(parse_size("2GB").unwrap()).unwrap(), "2.00 GiB");
    }
}
