//! Input filters
//!
//! A filter is consulted before an edit is committed to a text buffer. The
//! edit is described as "replace `dest[dstart..dend]` with
//! `source[start..end]`"; `dstart == dend` is a plain insertion and
//! `dstart < dend` replaces a selection (or autocompletes over it).
//!
//! Filters only look at their inputs and return a verdict. Applying the
//! verdict is up to the caller.

pub mod char_count;
pub mod debug;
pub mod length;

use std::ops::Range;

pub use char_count::CharCountFilter;
pub use debug::DebugFilter;
pub use length::LengthFilter;

/// A proposed replacement of `dest[dstart..dend]` by `source[start..end]`.
///
/// Only [`Edit::new`] and [`Edit::insertion`] build one, so the ranges are
/// always in bounds and ordered.
#[derive(Debug, Clone, Copy)]
pub struct Edit<'s, 'd> {
    source: &'s [u16],
    start: usize,
    end: usize,
    dest: &'d [u16],
    dstart: usize,
    dend: usize,
}

impl<'s, 'd> Edit<'s, 'd> {
    /// Describe an edit.
    ///
    /// Panics if either range is reversed or out of bounds. Those edits
    /// come from a broken caller and are not clamped.
    pub fn new(
        source: &'s [u16],
        start: usize,
        end: usize,
        dest: &'d [u16],
        dstart: usize,
        dend: usize,
    ) -> Self {
        assert!(
            start <= end && end <= source.len(),
            "source range {}..{} out of bounds for length {}",
            start,
            end,
            source.len()
        );
        assert!(
            dstart <= dend && dend <= dest.len(),
            "dest range {}..{} out of bounds for length {}",
            dstart,
            dend,
            dest.len()
        );
        Self {
            source,
            start,
            end,
            dest,
            dstart,
            dend,
        }
    }

    /// Replace `dest[range]` with the whole of `source`
    pub fn insertion(source: &'s [u16], dest: &'d [u16], range: Range<usize>) -> Self {
        Self::new(source, 0, source.len(), dest, range.start, range.end)
    }

    /// Newly typed or pasted text
    pub fn source(&self) -> &'s [u16] {
        self.source
    }

    /// Start of the inserted span in `source` (inclusive)
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the inserted span in `source` (exclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Current buffer contents
    pub fn dest(&self) -> &'d [u16] {
        self.dest
    }

    /// Start of the replaced span in `dest` (inclusive)
    pub fn dstart(&self) -> usize {
        self.dstart
    }

    /// End of the replaced span in `dest` (exclusive)
    pub fn dend(&self) -> usize {
        self.dend
    }

    /// The requested replacement text
    pub fn inserted(&self) -> &'s [u16] {
        &self.source[self.start..self.end]
    }

    /// Units of `dest` that survive the edit, before and after the replaced span
    pub fn kept(&self) -> impl Iterator<Item = u16> + 'd {
        let dest = self.dest;
        dest[..self.dstart]
            .iter()
            .chain(&dest[self.dend..])
            .copied()
    }

    /// Number of `dest` units that survive the edit
    pub fn kept_len(&self) -> usize {
        self.dest.len() - (self.dend - self.dstart)
    }
}

/// Verdict of an [`InputFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome<'s> {
    /// Accept the requested replacement as is
    Unchanged,
    /// Insert these units instead. Empty rejects the insertion, but the
    /// replaced span of `dest` is still removed.
    Replacement(&'s [u16]),
}

impl<'s> FilterOutcome<'s> {
    /// Units that end up in the buffer for `edit`
    pub fn accepted(self, edit: &Edit<'s, '_>) -> &'s [u16] {
        match self {
            FilterOutcome::Unchanged => edit.inserted(),
            FilterOutcome::Replacement(units) => units,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FilterOutcome::Unchanged)
    }
}

/// Gate consulted on every proposed edit
pub trait InputFilter: Send + Sync {
    fn filter<'s>(&self, edit: &Edit<'s, '_>) -> FilterOutcome<'s>;
}

impl<F: InputFilter + ?Sized> InputFilter for Box<F> {
    fn filter<'s>(&self, edit: &Edit<'s, '_>) -> FilterOutcome<'s> {
        (**self).filter(edit)
    }
}

/// Run `edit` through a chain of filters.
///
/// Each filter sees the previous filter's output as its source, and the
/// units that survive every filter are returned.
pub fn apply_chain<'s, F: InputFilter>(filters: &[F], edit: &Edit<'s, '_>) -> &'s [u16] {
    let mut current = edit.inserted();
    for filter in filters {
        let step = Edit::new(
            current,
            0,
            current.len(),
            edit.dest(),
            edit.dstart(),
            edit.dend(),
        );
        current = filter.filter(&step).accepted(&step);
    }
    current
}
