//! # Interpunct Core
//!
//! Data-alignment pipeline for punctuation and boundary tag restoration.
//! Turns tag-annotated corpus lines into word/label pairs, fits a frozen
//! label vocabulary, aligns label codes onto subword-tokenizer positions and
//! scores padded prediction batches with role-filtered F1.
//!
//! ## Quick Start
//!
//! ```rust
//! use interpunct_core::{LabelVocabulary, MetricEvaluator, SequenceAligner, TagExtractor};
//!
//! let example = TagExtractor::new().extract("0 hello world <comma> foo", 1).unwrap();
//! let vocab = LabelVocabulary::fit([&example.labels]).unwrap();
//!
//! let codes = vocab.encode(&example.labels).unwrap();
//! let aligned = SequenceAligner::new().align(&codes, 6).unwrap();
//! assert_eq!(aligned, vec![0, 1, 2, 1, 0, 0]);
//!
//! let width = vocab.num_labels();
//! let probs: Vec<Vec<f32>> = codes
//!     .iter()
//!     .map(|&c| (0..width).map(|k| if k == c as usize { 1.0 } else { 0.0 }).collect())
//!     .collect();
//! let report = MetricEvaluator::new(&vocab).evaluate(&[codes], &[probs]).unwrap();
//! assert_eq!(report.f1, 1.0);
//! ```
pub mod align;
pub mod corpus;
pub mod error;
pub mod labels;
pub mod metrics;

// Re-export primary API
pub use align::SequenceAligner;
pub use corpus::{AnnotatedExample, TagExtractor};
pub use error::{InterpunctError, Result};
pub use labels::{LabelRole, LabelVocabulary, SentinelLabels, VocabularyFile};
pub use metrics::{EvaluatorConfig, MetricEvaluator, MetricReport, ScoringWindow};
