//! Parsing and formatting of human-readable sizes and bitrates.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

static SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([\d.]+)\s*([KMG]?B)?\s*$").expect("size pattern is valid")
});

static BITRATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*k?\s*$").expect("bitrate pattern is valid"));

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Errors raised while parsing unit strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// The string is not `<number>[B|KB|MB|GB]`.
    #[error("Could not parse size: {0}")]
    InvalidSizeFormat(String),

    /// The string is not `<integer>[k]`.
    #[error("Invalid bitrate: {0}")]
    InvalidBitrateFormat(String),
}

/// Parses a size such as `2.5MB`, `900kb` or `1024` into bytes.
///
/// Units are binary (1 KB = 1024 bytes) and case-insensitive. Fractional
/// results are truncated.
pub fn parse_size(input: &str) -> Result<u64, UnitError> {
    let invalid = || UnitError::InvalidSizeFormat(input.to_string());

    let caps = SIZE_RE.captures(input).ok_or_else(invalid)?;
    let value: f64 = caps[1].parse().map_err(|_| invalid())?;
    let scale = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        None => 1,
        Some(unit) => match unit.as_str() {
            "B" => 1,
            "KB" => KIB,
            "MB" => MIB,
            "GB" => GIB,
            _ => return Err(invalid()),
        },
    };

    let bytes = value * scale as f64;
    if !bytes.is_finite() || bytes > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(bytes as u64)
}

/// Parses a bitrate in kilobits, such as `32k` or `64`, into bits per second.
///
/// The `k` is optional: `64` and `64k` both mean 64000 bps.
pub fn parse_bitrate(input: &str) -> Result<u32, UnitError> {
    let invalid = || UnitError::InvalidBitrateFormat(input.to_string());

    let caps = BITRATE_RE.captures(input).ok_or_else(invalid)?;
    let value: u32 = caps[1].parse().map_err(|_| invalid())?;
    value.checked_mul(1000).ok_or_else(invalid)
}

/// Formats a byte count for display, e.g. `512B`, `1.5KB`, `2.0MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        return format!("{}B", bytes);
    }
    let mut value = bytes as f64 / KIB as f64;
    for unit in ["KB", "MB"] {
        if value < 1024.0 {
            return format!("{:.1}{}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1}GB", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("2.5MB").unwrap(), 2_621_440);
        assert_eq!(parse_size("900KB").unwrap(), 921_600);
        assert_eq!(parse_size("1GB").unwrap(), 1_073_741_824);
        assert_eq!(parse_size("512B").unwrap(), 512);
    }

    #[test]
    fn test_parse_size_defaults_to_bytes() {
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("  10.9 ").unwrap(), 10);
    }

    #[test]
    fn test_parse_size_case_and_whitespace() {
        assert_eq!(parse_size("1mb").unwrap(), MIB);
        assert_eq!(parse_size(" 3 Kb ").unwrap(), 3 * KIB);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        for bad in ["abc", "5XB", "", "MB", "1.2.3MB", "-1MB", "1TB"] {
            assert_eq!(
                parse_size(bad),
                Err(UnitError::InvalidSizeFormat(bad.to_string())),
                "input: {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_bitrate() {
        assert_eq!(parse_bitrate("32k").unwrap(), 32_000);
        assert_eq!(parse_bitrate("64K").unwrap(), 64_000);
        assert_eq!(parse_bitrate(" 96 k ").unwrap(), 96_000);
    }

    #[test]
    fn test_parse_bitrate_bare_number_is_kilobits() {
        assert_eq!(parse_bitrate("64").unwrap(), 64_000);
        assert_eq!(parse_bitrate(" 24 ").unwrap(), 24_000);
        assert_eq!(
            parse_bitrate("4294968"),
            Err(UnitError::InvalidBitrateFormat("4294968".to_string()))
        );
    }

    #[test]
    fn test_parse_bitrate_rejects_garbage() {
        for bad in ["fast", "32kb", "3.5k", "-32k", "", "99999999999k"] {
            assert_eq!(
                parse_bitrate(bad),
                Err(UnitError::InvalidBitrateFormat(bad.to_string())),
                "input: {bad:?}"
            );
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(1023), "1023B");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(2_621_440), "2.5MB");
        assert_eq!(format_bytes(3 * GIB), "3.0GB");
        assert_eq!(format_bytes(5000 * GIB), "5000.0GB");
    }
}
