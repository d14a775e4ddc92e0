pub mod evaluator;
pub mod f1;
pub mod report;

pub use evaluator::{EvaluatorConfig, MetricEvaluator, ScoringWindow};
pub use f1::{class_counts, ClassCounts};
pub use report::{ClassScore, MetricReport, AGGREGATE_KEY, CLASS_KEY_PREFIX};
