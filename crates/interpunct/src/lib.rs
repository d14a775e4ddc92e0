//! # Interpunct
//!
//! Umbrella crate for the punctuation tag restoration pipeline.
//!
//! - [`pipeline`]: tag extraction, label vocabulary, sequence alignment and F1
//! - [`trainer`]: corpus files, subword encoding, dataset preparation

pub use interpunct_core as pipeline;
pub use interpunct_trainer as trainer;

pub use interpunct_core::{
    AnnotatedExample, InterpunctError, LabelVocabulary, MetricEvaluator, MetricReport,
    SequenceAligner, TagExtractor,
};
