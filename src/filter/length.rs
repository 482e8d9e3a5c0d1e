use super::{Edit, FilterOutcome, InputFilter};
use crate::count::is_high_surrogate;

/// Hard limit on the number of UTF-16 code units in the buffer.
///
/// Every unit counts 1 regardless of script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilter {
    max: usize,
}

impl LengthFilter {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl InputFilter for LengthFilter {
    fn filter<'s>(&self, edit: &Edit<'s, '_>) -> FilterOutcome<'s> {
        let keep = match self.max.checked_sub(edit.kept_len()) {
            Some(keep) if keep > 0 => keep,
            _ => return FilterOutcome::Replacement(&[]),
        };
        if keep >= edit.end() - edit.start() {
            return FilterOutcome::Unchanged;
        }

        let mut end = edit.start() + keep;
        if is_high_surrogate(edit.source()[end - 1]) {
            end -= 1;
            if end == edit.start() {
                return FilterOutcome::Replacement(&[]);
            }
        }
        FilterOutcome::Replacement(&edit.source()[edit.start()..end])
    }
}
