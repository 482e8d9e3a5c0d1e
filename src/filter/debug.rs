use log::debug;

use super::{Edit, FilterOutcome, InputFilter, LengthFilter};
use crate::count::utf16::decode_lossy;

/// Wraps a filter and logs every edit it sees together with its verdict
#[derive(Debug, Clone)]
pub struct DebugFilter<F> {
    inner: F,
}

impl<F: InputFilter> DebugFilter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl DebugFilter<LengthFilter> {
    /// A [`LengthFilter`] that logs what it does
    pub fn length(max: usize) -> Self {
        Self::new(LengthFilter::new(max))
    }
}

impl<F: InputFilter> InputFilter for DebugFilter<F> {
    fn filter<'s>(&self, edit: &Edit<'s, '_>) -> FilterOutcome<'s> {
        let outcome = self.inner.filter(edit);
        debug!(
            target: "charcount::filter",
            "filter: source={:?}, start={}, end={}, dest={:?}, dstart={}, dend={}, outcome={}",
            decode_lossy(edit.source()),
            edit.start(),
            edit.end(),
            decode_lossy(edit.dest()),
            edit.dstart(),
            edit.dend(),
            describe(&outcome),
        );
        outcome
    }
}

fn describe(outcome: &FilterOutcome<'_>) -> String {
    match outcome {
        FilterOutcome::Unchanged => "unchanged".to_string(),
        FilterOutcome::Replacement(units) => format!("[{}]", decode_lossy(units)),
    }
}
