//! # Metric Evaluator
//!
//! Scores padded prediction batches against padded gold batches. Padding is
//! stripped per example, the remaining codes are flattened across the batch
//! and per-class F1 is computed over the flattened sequences. The aggregate
//! is the unweighted mean over classes whose role is scored.

use tracing::{debug, warn};

use crate::error::{InterpunctError, Result};
use crate::labels::{LabelVocabulary, PAD_CODE};
use crate::metrics::f1::class_counts;
use crate::metrics::report::{ClassScore, MetricReport};

/// Which prediction positions are compared against the gold codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringWindow {
    /// Gold is the non-padding codes in order; predictions are read from the
    /// first `n` positions, `n` being the number of non-padding gold codes.
    #[default]
    Prefix,
    /// Predictions are read at exactly the positions where gold is not
    /// padding, which keeps them congruent with the aligner's start offset.
    GoldMask,
}

/// Evaluator settings.
#[derive(Debug, Clone, Default)]
pub struct EvaluatorConfig {
    pub window: ScoringWindow,
}

impl EvaluatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring window.
    pub fn with_window(mut self, window: ScoringWindow) -> Self {
        self.window = window;
        self
    }
}

/// Computes F1 reports against a frozen vocabulary.
#[derive(Debug, Clone)]
pub struct MetricEvaluator<'v> {
    vocabulary: &'v LabelVocabulary,
    config: EvaluatorConfig,
}

impl<'v> MetricEvaluator<'v> {
    /// Create an evaluator with the default [`ScoringWindow::Prefix`].
    pub fn new(vocabulary: &'v LabelVocabulary) -> Self {
        Self::with_config(vocabulary, EvaluatorConfig::default())
    }

    pub fn with_config(vocabulary: &'v LabelVocabulary, config: EvaluatorConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate one batch.
    ///
    /// # Arguments
    /// * `gold_batch` - Per-example gold codes, padded with 0
    /// * `pred_batch` - Per-example, per-position class-probability vectors,
    ///   each `vocabulary.num_labels()` wide
    ///
    /// # Errors
    /// [`InterpunctError::ShapeMismatch`] when batch sizes, per-example
    /// lengths or vector widths disagree; [`InterpunctError::UnknownCode`]
    /// when gold holds a code the vocabulary does not know.
    pub fn evaluate<G, P>(&self, gold_batch: &[G], pred_batch: &[P]) -> Result<MetricReport>
    where
        G: AsRef<[u32]>,
        P: AsRef<[Vec<f32>]>,
    {
        if gold_batch.len() != pred_batch.len() {
            return Err(InterpunctError::ShapeMismatch(format!(
                "{} gold examples but {} predictions",
                gold_batch.len(),
                pred_batch.len()
            )));
        }

        let width = self.vocabulary.num_labels();
        let mut gold_flat: Vec<u32> = Vec::new();
        let mut pred_flat: Vec<u32> = Vec::new();

        for (idx, (gold, pred)) in gold_batch.iter().zip(pred_batch).enumerate() {
            let (gold, pred) = (gold.as_ref(), pred.as_ref());
            self.check_example(idx, gold, pred, width)?;

            match self.config.window {
                ScoringWindow::Prefix => {
                    let before = gold_flat.len();
                    gold_flat.extend(gold.iter().copied().filter(|&c| c != PAD_CODE));
                    let content_length = gold_flat.len() - before;
                    pred_flat.extend(pred[..content_length].iter().map(|p| argmax(p)));
                }
                ScoringWindow::GoldMask => {
                    for (&g, p) in gold.iter().zip(pred) {
                        if g != PAD_CODE {
                            gold_flat.push(g);
                            pred_flat.push(argmax(p));
                        }
                    }
                }
            }
        }

        let counts = class_counts(&gold_flat, &pred_flat)?;

        let mut classes = Vec::with_capacity(counts.len());
        for (code, c) in counts {
            let label = self
                .vocabulary
                .decode(code)
                .ok_or(InterpunctError::UnknownCode(code))?;
            let role = self
                .vocabulary
                .role(code)
                .ok_or(InterpunctError::UnknownCode(code))?;
            classes.push(ClassScore {
                code,
                label: label.to_string(),
                role,
                precision: c.precision(),
                recall: c.recall(),
                f1: c.f1(),
                support: c.support(),
            });
        }

        let retained: Vec<f64> = classes
            .iter()
            .filter(|c| c.role.is_scored())
            .map(|c| c.f1)
            .collect();
        let f1 = if retained.is_empty() {
            warn!("no scored class occurred in the batch; aggregate F1 set to 0");
            0.0
        } else {
            retained.iter().sum::<f64>() / retained.len() as f64
        };

        debug!(
            examples = gold_batch.len(),
            positions = gold_flat.len(),
            classes = classes.len(),
            f1,
            "evaluated batch"
        );

        Ok(MetricReport {
            classes,
            f1,
            scored_positions: gold_flat.len(),
        })
    }

    fn check_example(
        &self,
        idx: usize,
        gold: &[u32],
        pred: &[Vec<f32>],
        width: usize,
    ) -> Result<()> {
        if gold.len() != pred.len() {
            return Err(InterpunctError::ShapeMismatch(format!(
                "example {idx}: gold has {} positions, prediction has {}",
                gold.len(),
                pred.len()
            )));
        }
        if let Some((pos, probs)) = pred.iter().enumerate().find(|(_, p)| p.len() != width) {
            return Err(InterpunctError::ShapeMismatch(format!(
                "example {idx}, position {pos}: expected {width} class scores, got {}",
                probs.len()
            )));
        }
        Ok(())
    }
}

/// Index of the largest score; the first one wins on ties.
fn argmax(scores: &[f32]) -> u32 {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best as u32
}
