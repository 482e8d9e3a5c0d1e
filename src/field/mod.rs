//! Single-line text input field
//!
//! Holds the text as UTF-16 code units and runs every edit through its
//! filters before committing it. Deletions go through the filters as
//! well, as edits with an empty insertion.

use std::ops::Range;

use log::debug;
use thiserror::Error;

use crate::count::utf16::{decode_lossy, encode, next_boundary, prev_boundary, splits_pair};
use crate::count::{char_count, char_count_ceil, Counter};
use crate::filter::{apply_chain, Edit, InputFilter};

/// Errors for edits requested through the field API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("range {start}..{end} is invalid for text of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("offset {0} falls inside a surrogate pair")]
    SplitsSurrogatePair(usize),
}

/// What an edit did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Where the edit happened
    pub start: usize,
    /// Units removed from the buffer
    pub removed: usize,
    /// Units actually inserted
    pub inserted: usize,
    /// Units the caller asked to insert
    pub requested: usize,
}

impl Applied {
    /// True if the filters cut the insertion short
    pub fn was_clipped(&self) -> bool {
        self.inserted < self.requested
    }
}

/// A text field guarded by input filters
pub struct TextField {
    text: Vec<u16>,
    /// Cursor offset in code units, always on a character boundary
    cursor: usize,
    /// Selected span; the cursor sits at its end
    selection: Option<Range<usize>>,
    filters: Vec<Box<dyn InputFilter>>,
}

impl TextField {
    /// Create an empty field with no filters
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            cursor: 0,
            selection: None,
            filters: Vec::new(),
        }
    }

    /// Builder-style: add a filter to the end of the chain
    pub fn with_filter(mut self, filter: impl InputFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Replace the whole filter chain
    pub fn set_filters(&mut self, filters: Vec<Box<dyn InputFilter>>) {
        self.filters = filters;
    }

    /// Text as UTF-16 code units
    pub fn units(&self) -> &[u16] {
        &self.text
    }

    /// Text as a string (lone surrogates become U+FFFD)
    pub fn text(&self) -> String {
        decode_lossy(&self.text)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Weighted count of the current text
    pub fn char_count(&self) -> f64 {
        char_count(&self.text)
    }

    /// Weighted count rounded up
    pub fn char_count_ceil(&self) -> usize {
        char_count_ceil(&self.text)
    }

    /// Indicator for a field limited to `max`
    pub fn counter(&self, max: usize) -> Counter {
        Counter::new(&self.text, max)
    }

    /// Replace `range` with `text`, subject to the filters
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<Applied, FieldError> {
        self.check_range(&range)?;
        Ok(self.commit(range, text))
    }

    /// Type or paste `text` over the selection, or at the cursor
    pub fn insert_str(&mut self, text: &str) -> Applied {
        let range = self
            .selection
            .clone()
            .unwrap_or(self.cursor..self.cursor);
        self.commit(range, text)
    }

    /// Replace the whole text, subject to the filters
    pub fn set_text(&mut self, text: &str) -> Applied {
        self.selection = Some(0..self.text.len());
        self.insert_str(text)
    }

    /// Delete the selection, or the character before the cursor
    pub fn backspace(&mut self) -> Option<Applied> {
        let range = match self.selection.clone() {
            Some(sel) => sel,
            None if self.cursor == 0 => return None,
            None => prev_boundary(&self.text, self.cursor)..self.cursor,
        };
        self.selection = Some(range);
        Some(self.insert_str(""))
    }

    /// Delete the selection, or the character after the cursor
    pub fn delete_forward(&mut self) -> Option<Applied> {
        let range = match self.selection.clone() {
            Some(sel) => sel,
            None if self.cursor >= self.text.len() => return None,
            None => self.cursor..next_boundary(&self.text, self.cursor),
        };
        self.selection = Some(range);
        Some(self.insert_str(""))
    }

    /// Remove all text
    pub fn clear(&mut self) {
        if !self.text.is_empty() {
            self.select_all();
            self.insert_str("");
        }
    }

    /// Move cursor one character left, collapsing any selection to its start
    pub fn move_left(&mut self) {
        if let Some(sel) = self.selection.take() {
            self.cursor = sel.start;
            return;
        }
        self.cursor = prev_boundary(&self.text, self.cursor);
    }

    /// Move cursor one character right, collapsing any selection to its end
    pub fn move_right(&mut self) {
        if let Some(sel) = self.selection.take() {
            self.cursor = sel.end;
            return;
        }
        self.cursor = next_boundary(&self.text, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.selection = None;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.selection = None;
        self.cursor = self.text.len();
    }

    /// Place the cursor at a unit offset
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), FieldError> {
        self.check_range(&(offset..offset))?;
        self.selection = None;
        self.cursor = offset;
        Ok(())
    }

    /// Select a span of units
    pub fn select(&mut self, range: Range<usize>) -> Result<(), FieldError> {
        self.check_range(&range)?;
        self.cursor = range.end;
        self.selection = if range.is_empty() { None } else { Some(range) };
        Ok(())
    }

    pub fn select_all(&mut self) {
        if self.text.is_empty() {
            self.selection = None;
        } else {
            self.selection = Some(0..self.text.len());
        }
        self.cursor = self.text.len();
    }

    /// Text before the cursor, for positioning a terminal caret
    pub fn before_cursor(&self) -> String {
        decode_lossy(&self.text[..self.cursor])
    }

    /// Apply an edit whose range is already known to be valid
    fn commit(&mut self, range: Range<usize>, text: &str) -> Applied {
        let source = encode(text);
        let edit = Edit::insertion(&source, &self.text, range.clone());
        let accepted = apply_chain(&self.filters, &edit);

        let applied = Applied {
            start: range.start,
            removed: range.end - range.start,
            inserted: accepted.len(),
            requested: source.len(),
        };

        debug!("before text changed: {:?}", self.text());
        self.text.splice(range.clone(), accepted.iter().copied());
        self.cursor = range.start + applied.inserted;
        self.selection = None;
        debug!(
            "after text changed: {:?} ({:.1} counted)",
            self.text(),
            self.char_count()
        );
        if applied.was_clipped() {
            debug!(
                "insertion clipped from {} to {} units",
                applied.requested, applied.inserted
            );
        }
        applied
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), FieldError> {
        if range.start > range.end || range.end > self.text.len() {
            return Err(FieldError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }
        for idx in [range.start, range.end] {
            if splits_pair(&self.text, idx) {
                return Err(FieldError::SplitsSurrogatePair(idx));
            }
        }
        Ok(())
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}
