//! UTF-16 code unit utilities
//!
//! All counting in this crate happens on UTF-16 code units, not on
//! Unicode scalars or grapheme clusters:
//! - BMP characters (U+0000 to U+FFFF) are 1 code unit
//! - Characters above U+FFFF are a surrogate pair (high + low)
//!
//! This module converts between Rust strings and unit sequences and knows
//! where the character boundaries inside a unit sequence are.

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// Check if a code unit is the first half of a surrogate pair
pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&unit)
}

/// Check if a code unit is the second half of a surrogate pair
pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit)
}

/// Encode a string as UTF-16 code units
pub fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Decode UTF-16 code units, replacing lone surrogates with U+FFFD
pub fn decode_lossy(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Check whether `idx` falls between the two halves of a surrogate pair
pub fn splits_pair(units: &[u16], idx: usize) -> bool {
    idx > 0
        && idx < units.len()
        && is_high_surrogate(units[idx - 1])
        && is_low_surrogate(units[idx])
}

/// Index of the character boundary before `idx`.
///
/// A well-formed surrogate pair is stepped over as one character.
pub fn prev_boundary(units: &[u16], idx: usize) -> usize {
    if idx == 0 {
        return 0;
    }
    let idx = idx.min(units.len());
    if idx >= 2 && is_low_surrogate(units[idx - 1]) && is_high_surrogate(units[idx - 2]) {
        idx - 2
    } else {
        idx - 1
    }
}

/// Index of the character boundary after `idx`.
///
/// A well-formed surrogate pair is stepped over as one character.
pub fn next_boundary(units: &[u16], idx: usize) -> usize {
    if idx >= units.len() {
        return units.len();
    }
    if idx + 1 < units.len()
        && is_high_surrogate(units[idx])
        && is_low_surrogate(units[idx + 1])
    {
        idx + 2
    } else {
        idx + 1
    }
}
