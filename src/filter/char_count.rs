use super::{Edit, FilterOutcome, InputFilter};
use crate::count::{is_high_surrogate, unit_weight};

/// Weighted character limit.
///
/// ASCII units count 0.5 and everything else 1.0, the same rule as
/// [`crate::count::char_count`]. An edit is admitted in full while the
/// buffer stays within `max`; otherwise the longest prefix of the
/// insertion that fits is admitted, never ending in half a surrogate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCountFilter {
    max: usize,
}

impl CharCountFilter {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl InputFilter for CharCountFilter {
    fn filter<'s>(&self, edit: &Edit<'s, '_>) -> FilterOutcome<'s> {
        // Count of the buffer once the replaced span is gone
        let dest_count: f64 = edit.kept().map(unit_weight).sum();

        let keep = self.max as f64 - dest_count;
        if keep <= 0.0 {
            return FilterOutcome::Replacement(&[]);
        }

        let source = edit.source();
        let mut source_count = 0.0;
        for index in edit.start()..edit.end() {
            source_count += unit_weight(source[index]);
            if source_count > keep {
                if index == edit.start() {
                    // Not even the first unit fits
                    return FilterOutcome::Replacement(&[]);
                }
                let mut end = index;
                if is_high_surrogate(source[end - 1]) {
                    end -= 1;
                    if end == edit.start() {
                        return FilterOutcome::Replacement(&[]);
                    }
                }
                return FilterOutcome::Replacement(&source[edit.start()..end]);
            }
        }
        FilterOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::{char_count, utf16::encode};

    fn run<'s>(
        max: usize,
        source: &'s [u16],
        dest: &[u16],
        range: std::ops::Range<usize>,
    ) -> FilterOutcome<'s> {
        CharCountFilter::new(max).filter(&Edit::insertion(source, dest, range))
    }

    #[test]
    fn test_insertion_that_fits_is_unchanged() {
        let source = encode("world");
        let dest = encode("你好");
        // keep = 10 - 2 = 8, "world" = 2.5
        assert_eq!(run(10, &source, &dest, 2..2), FilterOutcome::Unchanged);
    }

    #[test]
    fn test_full_buffer_rejects_insertion() {
        let source = encode("a");
        let dest = encode("你好你好你好你好你好");
        assert_eq!(run(10, &source, &dest, 10..10), FilterOutcome::Replacement(&[]));
    }

    #[test]
    fn test_full_buffer_rejects_even_empty_insertion() {
        let dest = encode("你好你好你好你好你好");
        assert_eq!(run(10, &[], &dest, 10..10), FilterOutcome::Replacement(&[]));
    }

    #[test]
    fn test_ascii_buffer_at_half_budget() {
        // "0123456789" counts 5.0, leaving 5.0 for the insertion
        let dest = encode("0123456789");

        let source = encode("abc");
        assert_eq!(run(10, &source, &dest, 10..10), FilterOutcome::Unchanged);

        let source = encode("abcdefghijkl");
        assert_eq!(
            run(10, &source, &dest, 10..10),
            FilterOutcome::Replacement(&encode("abcdefghij")[..])
        );

        let source = encode("你好你好你好");
        assert_eq!(
            run(10, &source, &dest, 10..10),
            FilterOutcome::Replacement(&encode("你好你好你")[..])
        );
    }

    #[test]
    fn test_insertion_is_clipped() {
        let source = encode("hello world");
        let dest = encode("你好你好你好你好");
        // keep = 2.0 fits four ASCII units
        assert_eq!(
            run(10, &source, &dest, 8..8),
            FilterOutcome::Replacement(&encode("hell")[..])
        );
    }

    #[test]
    fn test_first_unit_does_not_fit() {
        let source = encode("好");
        let dest = encode("你好你好你好你好你a");
        // keep = 0.5, 好 costs 1.0
        assert_eq!(run(10, &source, &dest, 10..10), FilterOutcome::Replacement(&[]));
    }

    #[test]
    fn test_emoji_into_empty_buffer() {
        let source = encode("😀😀");
        // high 1, low 2, high 3, low 4 > 3: back off past the dangling high
        assert_eq!(
            run(3, &source, &[], 0..0),
            FilterOutcome::Replacement(&encode("😀")[..])
        );
        // only the high surrogate would fit
        assert_eq!(run(1, &source, &[], 0..0), FilterOutcome::Replacement(&[]));
        assert_eq!(run(4, &source, &[], 0..0), FilterOutcome::Unchanged);
    }

    #[test]
    fn test_emoji_after_ascii() {
        let source = encode("a😀");
        // keep = 2.0: a 0.5, high 1.5, low 2.5
        assert_eq!(
            run(2, &source, &[], 0..0),
            FilterOutcome::Replacement(&encode("a")[..])
        );
    }

    #[test]
    fn test_replacing_selection_frees_budget() {
        let dest = encode("你好你好你好你好你好");
        let source = encode("abcd");

        // Selecting two CJK characters frees 2.0
        let outcome = run(10, &source, &dest, 0..2);
        assert_eq!(outcome, FilterOutcome::Unchanged);

        // Selecting one frees 1.0, so two ASCII units fit
        let outcome = run(10, &source, &dest, 0..1);
        assert_eq!(outcome, FilterOutcome::Replacement(&encode("ab")[..]));
    }

    #[test]
    fn test_rejected_replacement_still_deletes() {
        let dest = encode("你好你好你好你好你好x");
        let source = encode("好");
        // Without "x" the buffer counts 10.0, no room left
        let edit = Edit::insertion(&source, &dest, 10..11);
        let outcome = CharCountFilter::new(10).filter(&edit);
        assert_eq!(outcome, FilterOutcome::Replacement(&[]));

        let mut result: Vec<u16> = dest[..edit.dstart()].to_vec();
        result.extend_from_slice(outcome.accepted(&edit));
        result.extend_from_slice(&dest[edit.dend()..]);
        assert_eq!(char_count(&result), 10.0);
    }

    #[test]
    fn test_sub_range_of_source() {
        let source = encode("xxabcdyy");
        let edit = Edit::new(&source, 2, 6, &[], 0, 0);
        // keep = 1.0 fits "ab"; the slice is taken from the original source
        assert_eq!(
            CharCountFilter::new(1).filter(&edit),
            FilterOutcome::Replacement(&encode("ab")[..])
        );
        assert_eq!(CharCountFilter::new(2).filter(&edit), FilterOutcome::Unchanged);
    }

    #[test]
    fn test_empty_source_with_room() {
        let dest = encode("abc");
        assert_eq!(run(10, &[], &dest, 1..2), FilterOutcome::Unchanged);
    }

    #[test]
    fn test_zero_budget() {
        let source = encode("a");
        assert_eq!(run(0, &source, &[], 0..0), FilterOutcome::Replacement(&[]));
    }

    #[test]
    #[should_panic(expected = "dest range 4..1")]
    fn test_reversed_dest_range_fails_fast() {
        let source = encode("x");
        let dest = encode("abcde");
        CharCountFilter::new(10).filter(&Edit::new(&source, 0, 1, &dest, 4, 1));
    }

    #[test]
    #[should_panic(expected = "source range 3..1")]
    fn test_reversed_source_range_fails_fast() {
        let source = encode("xyz");
        CharCountFilter::new(10).filter(&Edit::new(&source, 3, 1, &[], 0, 0));
    }
}
