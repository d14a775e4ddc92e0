//! Per-class precision, recall and F1 over flattened code sequences.

use std::collections::BTreeMap;

use crate::error::{InterpunctError, Result};

/// Confusion counts for a single class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ClassCounts {
    /// `TP / (TP + FP)`, 0 when nothing was predicted as this class.
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// `TP / (TP + FN)`, 0 when the class never occurs in gold.
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Harmonic mean of precision and recall, 0 when both are 0.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }

    /// Number of gold occurrences.
    pub fn support(&self) -> usize {
        self.true_positives + self.false_negatives
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Count TP/FP/FN for every class present in either sequence.
///
/// Classes come back in ascending code order.
pub fn class_counts(gold: &[u32], predicted: &[u32]) -> Result<BTreeMap<u32, ClassCounts>> {
    if gold.len() != predicted.len() {
        return Err(InterpunctError::ShapeMismatch(format!(
            "flattened gold has {} positions, predictions have {}",
            gold.len(),
            predicted.len()
        )));
    }

    let mut counts: BTreeMap<u32, ClassCounts> = BTreeMap::new();
    for (&g, &p) in gold.iter().zip(predicted) {
        if g == p {
            counts.entry(g).or_default().true_positives += 1;
        } else {
            counts.entry(g).or_default().false_negatives += 1;
            counts.entry(p).or_default().false_positives += 1;
        }
    }

    Ok(counts)
}
