use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::labels::LabelRole;

/// Prefix of per-class keys in the flat metric map.
pub const CLASS_KEY_PREFIX: &str = "f1_";

/// Key of the aggregate score in the flat metric map.
pub const AGGREGATE_KEY: &str = "f1";

/// Scores for one class of the flattened batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub code: u32,
    pub label: String,
    pub role: LabelRole,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Gold occurrences of this class.
    pub support: usize,
}

/// Result of one evaluation call.
///
/// `classes` holds every class that occurred in gold or predictions,
/// filtered roles included. The aggregate only averages scored roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub classes: Vec<ClassScore>,
    /// Unweighted mean F1 over the retained classes.
    pub f1: f64,
    /// Number of positions compared after padding was stripped.
    pub scored_positions: usize,
}

impl MetricReport {
    /// Classes that take part in the aggregate.
    pub fn retained(&self) -> impl Iterator<Item = &ClassScore> {
        self.classes.iter().filter(|c| c.role.is_scored())
    }

    /// Look up a class by label.
    pub fn class(&self, label: &str) -> Option<&ClassScore> {
        self.classes.iter().find(|c| c.label == label)
    }

    /// Flat `name -> score` map: `f1_<label>` per retained class plus `f1`.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map: BTreeMap<String, f64> = self
            .retained()
            .map(|c| (format!("{CLASS_KEY_PREFIX}{}", c.label), c.f1))
            .collect();
        map.insert(AGGREGATE_KEY.to_string(), self.f1);
        map
    }
}
