//! Suffix-encoded quantities found in GC logs and on the command line.

use crate::error::GcLogError;

/// Byte suffix to multiplier.
const BYTE_UNITS: &[(char, u64)] = &[
    ('K', 1024),
    ('M', 1024 * 1024),
    ('G', 1024 * 1024 * 1024),
    ('T', 1024 * 1024 * 1024 * 1024),
];

/// Duration suffix to seconds multiplier.
const DURATION_UNITS: &[(char, u64)] = &[
    ('m', 60),
    ('h', 60 * 60),
    ('d', 60 * 60 * 24),
    ('w', 60 * 60 * 24 * 7),
];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Parse byte quantities like "3784M", "19983K" or "512".
pub fn resolve_byte_quantity(s: &str) -> Result<u64, GcLogError> {
    resolve_suffixed(s, BYTE_UNITS)
}

/// Parse durations like "30m", "2h", "1w" or "90" into seconds.
pub fn resolve_duration_quantity(s: &str) -> Result<u64, GcLogError> {
    resolve_suffixed(s, DURATION_UNITS)
}

/// Convert a byte count to mebibytes for display.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

fn resolve_suffixed(s: &str, units: &[(char, u64)]) -> Result<u64, GcLogError> {
    let (digits, multiplier) = match s.chars().last() {
        Some(last) => match units.iter().find(|(suffix, _)| *suffix == last) {
            Some((_, multiplier)) => (&s[..s.len() - last.len_utf8()], *multiplier),
            None => (s, 1),
        },
        None => (s, 1),
    };

    let value: u64 = digits.parse().map_err(|_| GcLogError::malformed(s))?;
    value.checked_mul(multiplier).ok_or_else(|| GcLogError::malformed(s))
}
