//! Which classes participate in each field's macro-F1
//!
//! Every field is scored over the distinct labels that occur in gold, so a
//! class that is only ever predicted never becomes an evaluated class. Its
//! false positives still count against the gold classes' precision.
//! Tickers add one switch: whether the null ticker is a class at all.

use crate::normalize::Ticker;
use std::collections::BTreeSet;

/// Distinct gold labels, sorted
pub fn gold_labels<L: Ord + Clone>(gold: &[L]) -> Vec<L> {
    gold.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct gold tickers, sorted, with the null ticker kept or dropped
pub fn ticker_labels(gold: &[Ticker], include_null: bool) -> Vec<Ticker> {
    gold.iter()
        .filter(|t| include_null || !t.is_null())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
