//! Scoring model outputs stored as tensors or JSON lines.

use std::io::BufRead;

use candle_core::{DType, Tensor};
use interpunct_core::{MetricEvaluator, MetricReport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TrainerError};

/// Gold codes and per-position class scores for one example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub gold: Vec<u32>,
    pub probs: Vec<Vec<f32>>,
}

/// Evaluate a `[batch, length]` gold tensor against `[batch, length, classes]`
/// logits or probabilities.
pub fn evaluate_tensors(
    evaluator: &MetricEvaluator<'_>,
    gold: &Tensor,
    scores: &Tensor,
) -> Result<MetricReport> {
    let gold: Vec<Vec<u32>> = gold.to_dtype(DType::U32)?.to_vec2()?;
    let scores: Vec<Vec<Vec<f32>>> = scores.to_dtype(DType::F32)?.to_vec3()?;
    Ok(evaluator.evaluate(&gold, &scores)?)
}

/// Read prediction records, one JSON object per line. Blank lines are skipped.
pub fn read_predictions<R: BufRead>(reader: R) -> Result<Vec<PredictionRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// Evaluate prediction records as a single batch.
pub fn evaluate_records(
    evaluator: &MetricEvaluator<'_>,
    records: &[PredictionRecord],
) -> Result<MetricReport> {
    if records.is_empty() {
        return Err(TrainerError::InvalidConfig(
            "no prediction records to evaluate".into(),
        ));
    }

    let gold: Vec<&[u32]> = records.iter().map(|r| r.gold.as_slice()).collect();
    let probs: Vec<&[Vec<f32>]> = records.iter().map(|r| r.probs.as_slice()).collect();
    let report = evaluator.evaluate(&gold, &probs)?;

    info!(
        examples = records.len(),
        positions = report.scored_positions,
        f1 = report.f1,
        "evaluation complete"
    );
    Ok(report)
}
