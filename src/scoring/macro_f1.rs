//! Per-class precision/recall/F1 and their unweighted (macro) mean
//!
//! ## Definitions
//!
//! For a class `c` over aligned `gold`/`pred` sequences:
//!
//! - **support**: positions where `gold == c`
//! - **tp**: `gold == c && pred == c`
//! - **fp**: `gold != c && pred == c`
//! - **fn**: `gold == c && pred != c`
//!
//! Precision, recall and F1 are `0.0` whenever their denominator is zero.
//! Macro-F1 averages F1 over the requested classes that have gold support;
//! zero-support classes are still reported but never enter the mean.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Confusion counts and derived scores for one class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Gold instances of the class
    pub support: usize,
    #[serde(rename = "tp")]
    pub true_positive: usize,
    #[serde(rename = "fp")]
    pub false_positive: usize,
    #[serde(rename = "fn")]
    pub false_negative: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl ClassMetrics {
    /// Derive precision/recall/F1 from raw counts
    pub fn from_counts(
        support: usize,
        true_positive: usize,
        false_positive: usize,
        false_negative: usize,
    ) -> Self {
        let precision = ratio(true_positive, true_positive + false_positive);
        let recall = ratio(true_positive, true_positive + false_negative);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            support,
            true_positive,
            false_positive,
            false_negative,
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Result of one macro-F1 scoring call
#[derive(Debug, Clone, PartialEq)]
pub struct MacroF1<L> {
    /// Mean F1 over evaluated classes with support > 0
    pub macro_f1: f64,
    /// One entry per requested class, in request order
    pub per_class: Vec<(L, ClassMetrics)>,
}

impl<L: PartialEq> MacroF1<L> {
    /// Metrics for a single class, if it was requested
    pub fn get(&self, label: &L) -> Option<&ClassMetrics> {
        self.per_class
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m)
    }

    /// Number of classes that entered the macro average
    pub fn averaged_classes(&self) -> usize {
        self.per_class.iter().filter(|(_, m)| m.support > 0).count()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    support: usize,
    tp: usize,
    fp: usize,
    fn_: usize,
}

/// Compute per-class metrics for `labels` and their macro-F1
///
/// `gold` and `pred` must be the same length. Repeated entries in `labels`
/// are evaluated once, at their first position.
pub fn macro_f1<L>(gold: &[L], pred: &[L], labels: &[L]) -> Result<MacroF1<L>>
where
    L: Eq + Hash + Clone,
{
    if gold.len() != pred.len() {
        return Err(EvalError::LengthMismatch {
            gold: gold.len(),
            pred: pred.len(),
        });
    }

    let mut seen = HashSet::with_capacity(labels.len());
    let labels: Vec<&L> = labels.iter().filter(|l| seen.insert(*l)).collect();

    // Only requested classes get counters; everything else is ignored
    let mut counts: HashMap<&L, Counts> =
        labels.iter().map(|l| (*l, Counts::default())).collect();

    for (g, p) in gold.iter().zip(pred) {
        if let Some(c) = counts.get_mut(g) {
            c.support += 1;
            if g == p {
                c.tp += 1;
            } else {
                c.fn_ += 1;
            }
        }
        if g != p {
            if let Some(c) = counts.get_mut(p) {
                c.fp += 1;
            }
        }
    }

    let per_class: Vec<(L, ClassMetrics)> = labels
        .iter()
        .map(|l| {
            let c = counts[*l];
            ((*l).clone(), ClassMetrics::from_counts(c.support, c.tp, c.fp, c.fn_))
        })
        .collect();

    let supported: Vec<f64> = per_class
        .iter()
        .filter(|(_, m)| m.support > 0)
        .map(|(_, m)| m.f1)
        .collect();
    let macro_f1 = if supported.is_empty() {
        0.0
    } else {
        supported.iter().sum::<f64>() / supported.len() as f64
    };

    Ok(MacroF1 {
        macro_f1,
        per_class,
    })
}

/// Fraction of positions where `gold` and `pred` agree exactly
///
/// Returns `0.0` for empty input.
pub fn micro_accuracy<L: PartialEq>(gold: &[L], pred: &[L]) -> f64 {
    let n = gold.len().min(pred.len());
    let matches = gold.iter().zip(pred).filter(|(g, p)| g == p).count();
    ratio(matches, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(xs: &[&'static str]) -> Vec<&'static str> {
        xs.to_vec()
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = macro_f1(&["a", "b"], &["a"], &["a"]).unwrap_err();
        assert!(matches!(err, EvalError::LengthMismatch { gold: 2, pred: 1 }));
    }

    #[test]
    fn test_confusion_counts() {
        let gold = labels(&["a", "a", "b", "c", "a"]);
        let pred = labels(&["a", "b", "b", "a", "c"]);
        let result = macro_f1(&gold, &pred, &["a", "b", "c"]).unwrap();

        let a = result.get(&"a").unwrap();
        assert_eq!((a.support, a.true_positive, a.false_positive, a.false_negative), (3, 1, 1, 2));
        assert!((a.precision - 0.5).abs() < 1e-12);
        assert!((a.recall - 1.0 / 3.0).abs() < 1e-12);
        assert!((a.f1 - 0.4).abs() < 1e-12);

        let b = result.get(&"b").unwrap();
        assert_eq!((b.support, b.true_positive, b.false_positive, b.false_negative), (1, 1, 1, 0));
        assert!((b.f1 - 2.0 / 3.0).abs() < 1e-12);

        let c = result.get(&"c").unwrap();
        assert_eq!((c.support, c.true_positive, c.false_positive, c.false_negative), (1, 0, 1, 1));
        assert_eq!(c.f1, 0.0);

        let expected = (0.4 + 2.0 / 3.0 + 0.0) / 3.0;
        assert!((result.macro_f1 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_division_is_zero() {
        let m = ClassMetrics::from_counts(0, 0, 0, 0);
        assert_eq!((m.precision, m.recall, m.f1), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_perfect_prediction_is_one() {
        let gold = labels(&["x", "y", "y", "z"]);
        let result = macro_f1(&gold, &gold, &["x", "y", "z"]).unwrap();
        assert_eq!(result.macro_f1, 1.0);
    }

    #[test]
    fn test_disjoint_prediction_is_zero() {
        let gold = labels(&["x", "y", "z"]);
        let pred = labels(&["y", "z", "x"]);
        let result = macro_f1(&gold, &pred, &["x", "y", "z"]).unwrap();
        assert_eq!(result.macro_f1, 0.0);
    }

    #[test]
    fn test_zero_support_class_reported_but_not_averaged() {
        let gold = labels(&["a", "a"]);
        let pred = labels(&["a", "b"]);
        let result = macro_f1(&gold, &pred, &["a", "b"]).unwrap();

        let b = result.get(&"b").unwrap();
        assert_eq!(b.support, 0);
        assert_eq!(b.false_positive, 1);
        assert_eq!(result.averaged_classes(), 1);
        // Only "a" is averaged: P=1, R=0.5
        assert!((result.macro_f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let empty: Vec<&str> = vec![];
        let result = macro_f1(&empty, &empty, &[]).unwrap();
        assert_eq!(result.macro_f1, 0.0);
        assert!(result.per_class.is_empty());

        let result = macro_f1(&empty, &empty, &["a"]).unwrap();
        assert_eq!(result.macro_f1, 0.0);
        assert_eq!(result.per_class.len(), 1);
    }

    #[test]
    fn test_duplicate_labels_evaluated_once() {
        let gold = labels(&["a", "b"]);
        let pred = labels(&["a", "a"]);
        let once = macro_f1(&gold, &pred, &["a", "b"]).unwrap();
        let twice = macro_f1(&gold, &pred, &["a", "b", "a"]).unwrap();
        assert_eq!(twice.per_class.len(), 2);
        assert_eq!(once.macro_f1, twice.macro_f1);
    }

    #[test]
    fn test_micro_accuracy() {
        assert_eq!(micro_accuracy(&["a", "b", "c", "d"], &["a", "x", "c", "y"]), 0.5);
        let empty: [&str; 0] = [];
        assert_eq!(micro_accuracy(&empty, &empty), 0.0);
    }
}
