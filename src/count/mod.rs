//! Weighted character counting
//!
//! Every ASCII code unit counts as 0.5 and every other UTF-16 code unit
//! counts as 1.0, so a field limited to N fits about 2N Latin letters or
//! N CJK characters. Counting happens per UTF-16 unit: an emoji outside the
//! BMP is a surrogate pair and counts 2.0, and modifier or ZWJ sequences
//! count every unit they contain.

pub mod utf16;

use std::fmt;

pub use utf16::{is_high_surrogate, is_low_surrogate};

/// Weight of a single code unit
pub fn unit_weight(unit: u16) -> f64 {
    if unit < 128 {
        0.5 // ASCII
    } else {
        1.0
    }
}

/// Weighted count of a code unit sequence
pub fn char_count(units: &[u16]) -> f64 {
    units.iter().map(|&u| unit_weight(u)).sum()
}

/// [`char_count`] rounded up, as shown to the user
pub fn char_count_ceil(units: &[u16]) -> usize {
    char_count(units).ceil() as usize
}

/// Longest prefix of `units` whose weighted count does not exceed `max`.
///
/// A surrogate pair is never split: when the unit that overflows is the
/// low half of a pair, the high half is dropped as well.
pub fn trim_by_char_count(units: &[u16], max: usize) -> &[u16] {
    let max = max as f64;
    let mut sum = 0.0;
    for (index, &unit) in units.iter().enumerate() {
        sum += unit_weight(unit);
        if sum > max {
            if index == 0 {
                return &[];
            }
            let mut end = index;
            if is_high_surrogate(units[index - 1]) {
                end -= 1;
            }
            return &units[..end];
        }
    }
    units
}

/// The "current / max" indicator shown next to an input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counter {
    /// Weighted count rounded up, as displayed
    pub count: usize,
    pub max: usize,
    weighted: f64,
}

impl Counter {
    pub fn new(units: &[u16], max: usize) -> Self {
        let weighted = char_count(units);
        Self {
            count: weighted.ceil() as usize,
            max,
            weighted,
        }
    }

    /// True once not even an ASCII unit fits. The rounded count can read
    /// "10 / 10" while half a unit is still free.
    pub fn is_full(&self) -> bool {
        self.weighted >= self.max as f64
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.count, self.max)
    }
}
